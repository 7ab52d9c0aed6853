// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS COMPARTILHADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Candidato descoberto pela busca, antes de scoring/fetch.
///
/// A `url` é a chave de deduplicação: dentro do conjunto de candidatos de uma
/// query, cada URL aparece no máximo uma vez (primeira ocorrência vence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSource {
    /// URL do resultado (não vazia)
    pub url: String,
    /// Título do resultado (pode ser vazio)
    pub title: String,
    /// Descrição/snippet retornado pela busca
    pub snippet: String,
    /// Qual estratégia de busca produziu este candidato (informativo)
    pub strategy_label: String,
}

impl CandidateSource {
    /// Cria um candidato a partir dos campos brutos da busca.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
            strategy_label: String::new(),
        }
    }

    /// Anexa o rótulo da estratégia que encontrou este candidato.
    pub fn with_strategy(mut self, label: impl Into<String>) -> Self {
        self.strategy_label = label.into();
        self
    }
}

/// Conteúdo extraído de uma URL em uma tentativa de fetch.
///
/// Criado uma vez por tentativa; nunca persistido, nunca retentado.
/// Falhas de fetch viram `success: false` com diagnóstico no título,
/// nunca um erro propagado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedContent {
    /// Título extraído da página
    pub title: String,
    /// Texto principal extraído (ausente quando nada pôde ser extraído)
    pub content: Option<String>,
    /// Se a extração foi bem sucedida
    pub success: bool,
}

impl FetchedContent {
    /// Resultado sentinela para um fetch que falhou.
    pub fn unavailable(diagnostic: impl Into<String>) -> Self {
        Self {
            title: diagnostic.into(),
            content: None,
            success: false,
        }
    }
}

/// Nível de credibilidade em bandas, derivado do score final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredibilityLevel {
    /// Score >= 2.5
    High,
    /// Score >= 1.5
    Medium,
    /// Qualquer score abaixo de 1.5
    Low,
}

impl CredibilityLevel {
    /// Classifica um score já clampado em [0.0, 3.0].
    pub fn from_score(score: f32) -> Self {
        if score >= 2.5 {
            Self::High
        } else if score >= 1.5 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Nome legível do nível.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Emoji usado na explicação e nos logs.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::High => "🟢",
            Self::Medium => "🟡",
            Self::Low => "🔴",
        }
    }
}

/// Resultado do scorer de credibilidade: função pura de uma URL.
///
/// Invariante: determinístico e sem efeitos colaterais; a mesma URL sempre
/// produz o mesmo resultado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityResult {
    /// Score clampado em [0.0, 3.0], arredondado para 1 casa decimal
    pub score: f32,
    /// Explicação legível, nunca vazia
    pub reason: String,
    /// Banda de credibilidade correspondente ao score
    pub level: CredibilityLevel,
}

/// Saída por candidato do orquestrador: score + conteúdo + resumo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedSource {
    /// Posição final (1-based, reatribuída após ordenação por score)
    pub rank: usize,
    /// Título preferindo o extraído; cai para o título da busca se o fetch falhou
    pub title: String,
    /// URL avaliada
    pub url: String,
    /// Resumo gerado, nunca vazio
    pub summary: String,
    /// Score de credibilidade da URL
    pub credibility_score: f32,
    /// Explicação do score
    pub credibility_reason: String,
    /// Se o fetch produziu conteúdo utilizável
    pub content_available: bool,
}

/// Resultado completo de uma query processada.
///
/// Dono exclusivo da sequência de `EvaluatedSource`; nada é compartilhado
/// entre queries. `error` está presente se e somente se `success == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Se o processamento terminou sem falha de orquestração
    pub success: bool,
    /// Query original
    pub query: String,
    /// Fontes avaliadas, rank ascendente = score descendente
    pub sources: Vec<EvaluatedSource>,
    /// Momento de conclusão do processamento
    pub timestamp: DateTime<Utc>,
    /// Log de progresso acumulado durante a execução
    pub status_log: Vec<String>,
    /// Mensagem de erro (apenas quando `success == false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Identificador único desta execução
    pub execution_id: Uuid,
}

impl QueryResult {
    /// Constrói um resultado de sucesso.
    pub fn success(
        query: impl Into<String>,
        sources: Vec<EvaluatedSource>,
        status_log: Vec<String>,
        execution_id: Uuid,
    ) -> Self {
        Self {
            success: true,
            query: query.into(),
            sources,
            timestamp: Utc::now(),
            status_log,
            error: None,
            execution_id,
        }
    }

    /// Constrói um resultado de falha de orquestração.
    pub fn failure(
        query: impl Into<String>,
        error: impl Into<String>,
        status_log: Vec<String>,
        execution_id: Uuid,
    ) -> Self {
        Self {
            success: false,
            query: query.into(),
            sources: vec![],
            timestamp: Utc::now(),
            status_log,
            error: Some(error.into()),
            execution_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let candidate = CandidateSource::new("https://example.com", "Example", "snippet")
            .with_strategy("Strategy 1");
        assert_eq!(candidate.url, "https://example.com");
        assert_eq!(candidate.strategy_label, "Strategy 1");
    }

    #[test]
    fn test_fetched_content_unavailable() {
        let content = FetchedContent::unavailable("Error");
        assert!(!content.success);
        assert!(content.content.is_none());
    }

    #[test]
    fn test_credibility_level_bands() {
        assert_eq!(CredibilityLevel::from_score(3.0), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(2.5), CredibilityLevel::High);
        assert_eq!(CredibilityLevel::from_score(2.4), CredibilityLevel::Medium);
        assert_eq!(CredibilityLevel::from_score(1.5), CredibilityLevel::Medium);
        assert_eq!(CredibilityLevel::from_score(1.4), CredibilityLevel::Low);
        assert_eq!(CredibilityLevel::from_score(0.0), CredibilityLevel::Low);
    }

    #[test]
    fn test_query_result_error_iff_failure() {
        let ok = QueryResult::success("q", vec![], vec![], Uuid::new_v4());
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed = QueryResult::failure("q", "boom", vec![], Uuid::new_v4());
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("boom"));
        assert!(failed.sources.is_empty());
    }
}
