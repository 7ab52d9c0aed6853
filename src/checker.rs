// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ORQUESTRADOR DO PIPELINE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Fluxo completo: busca → fan-out (score + fetch + resumo) por candidato →
// ordenação por credibilidade → ranking 1..N.
//
// Fan-out/fan-in com pool limitado: um Semaphore limita os workers e
// join_all espera todas as unidades. Falhas de colaborador nunca cruzam a
// fronteira da unidade como erro; viram valores sentinela.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::config::CheckerConfig;
use crate::credibility::score_url;
use crate::fetcher::ContentFetcher;
use crate::search::SearchClient;
use crate::status::{StatusLog, StatusSink};
use crate::summarizer::Summarizer;
use crate::types::{CandidateSource, EvaluatedSource, QueryResult};
use crate::utils::truncate_chars;

/// Excerpt substituto quando o fetch não produziu conteúdo.
const NO_CONTENT_PLACEHOLDER: &str = "No content available for summarization";

/// Gera a escada de estratégias de busca para uma query.
///
/// Ordem por efetividade: frase exata + contexto acadêmico, sites
/// acadêmicos conhecidos, PDFs acadêmicos. A query crua fica reservada
/// para a busca de fallback.
fn search_strategies(query: &str) -> Vec<String> {
    vec![
        format!("\"{}\" academic research", query),
        format!("{} site:arxiv.org OR site:ieee.org OR site:acm.org", query),
        format!("{} filetype:pdf academic", query),
    ]
}

/// Orquestrador de avaliação de credibilidade de fontes.
///
/// Todos os colaboradores entram por injeção de dependência; não há estado
/// global. Uma instância processa uma query por vez.
pub struct CredibilityChecker {
    search: Arc<dyn SearchClient>,
    fetcher: Arc<dyn ContentFetcher>,
    summarizer: Arc<dyn Summarizer>,
    status: Arc<StatusLog>,
    config: CheckerConfig,
}

impl CredibilityChecker {
    /// Cria um checker com configuração padrão e sem sink de progresso.
    pub fn new(
        search: Arc<dyn SearchClient>,
        fetcher: Arc<dyn ContentFetcher>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            search,
            fetcher,
            summarizer,
            status: Arc::new(StatusLog::new()),
            config: CheckerConfig::default(),
        }
    }

    /// Substitui a configuração do pipeline.
    pub fn with_config(mut self, config: CheckerConfig) -> Self {
        self.config = config;
        self
    }

    /// Anexa uma superfície de progresso ao vivo.
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.status = Arc::new(StatusLog::with_sink(sink));
        self
    }

    /// Ponto de entrada único do pipeline.
    ///
    /// Sempre retorna um `QueryResult`: falhas de orquestração viram
    /// `success: false` com o log de status acumulado até o ponto da falha.
    /// Zero candidatos é um resultado normal (`success: true`, `sources`
    /// vazio), não um erro.
    pub async fn process_query(&self, query: &str) -> QueryResult {
        let execution_id = Uuid::new_v4();

        self.status.reset();
        self.status
            .push("🚀 Starting academic source credibility check...");

        match self.run_pipeline(query).await {
            Ok(sources) => {
                self.status
                    .push("🎉 Academic source credibility check completed!");
                QueryResult::success(query, sources, self.status.snapshot(), execution_id)
            }
            Err(e) => {
                let message = format!("Error processing query: {}", e);
                self.status.push(format!("❌ {}", message));
                QueryResult::failure(query, message, self.status.snapshot(), execution_id)
            }
        }
    }

    async fn run_pipeline(&self, query: &str) -> anyhow::Result<Vec<EvaluatedSource>> {
        self.status.push(format!("🔍 Searching for '{}'...", query));

        let candidates = self.discover_sources(query).await;

        if candidates.is_empty() {
            self.status.push("❌ No search results found");
            return Ok(vec![]);
        }

        self.status
            .push(format!("✅ Found {} potential sources", candidates.len()));
        self.status.push(format!(
            "📖 Processing {} sources for credibility...",
            candidates.len()
        ));

        let semaphore = Arc::new(Semaphore::new(self.config.effective_workers()));

        let units = candidates.iter().enumerate().map(|(position, candidate)| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // O semáforo nunca é fechado; um erro aqui só ocorreria após
                // close() e nesse caso a unidade roda sem limitar.
                let _permit = semaphore.acquire_owned().await.ok();
                self.evaluate_candidate(position, candidate).await
            }
        });

        let mut evaluated = futures::future::join_all(units).await;

        self.status.push(format!(
            "🎯 Ranking {} sources by credibility...",
            evaluated.len()
        ));

        // Sort estável por score descendente: join_all devolve na ordem de
        // submissão, então empates preservam a posição original da busca.
        evaluated.sort_by(|a, b| {
            b.credibility_score
                .partial_cmp(&a.credibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (index, source) in evaluated.iter_mut().enumerate() {
            source.rank = index + 1;
        }

        if let Some(top) = evaluated.first() {
            self.status.push(format!(
                "✅ Analysis complete! Top source: {:.1}/3.0",
                top.credibility_score
            ));
        }

        Ok(evaluated)
    }

    /// Descobre candidatos pela escada de estratégias, deduplicando por URL
    /// (primeira ocorrência vence) e caindo para a query crua apenas quando
    /// nenhuma estratégia produziu resultados.
    ///
    /// Falha de uma estratégia individual é engolida (skip-and-continue);
    /// só a falha de todas produz lista vazia.
    async fn discover_sources(&self, query: &str) -> Vec<CandidateSource> {
        let max = self.config.max_sources;
        let mut seen: HashSet<String> = HashSet::new();
        let mut results: Vec<CandidateSource> = Vec::new();

        for (index, strategy) in search_strategies(query).iter().enumerate() {
            if results.len() >= max {
                break;
            }

            let remaining = max - results.len();
            match self.search.search(strategy, remaining).await {
                Ok(batch) => {
                    for candidate in batch {
                        if candidate.url.is_empty() || !seen.insert(candidate.url.clone()) {
                            continue;
                        }
                        results.push(candidate.with_strategy(format!("Strategy {}", index + 1)));
                    }
                }
                Err(e) => {
                    log::warn!("🔍 Search strategy {} failed: {}", index + 1, e);
                    continue;
                }
            }
        }

        if results.is_empty() {
            match self.search.search(query, max).await {
                Ok(batch) => {
                    for candidate in batch {
                        if candidate.url.is_empty() || !seen.insert(candidate.url.clone()) {
                            continue;
                        }
                        results.push(candidate.with_strategy("Fallback"));
                    }
                }
                Err(e) => log::warn!("🔍 Fallback search failed: {}", e),
            }
        }

        results.truncate(max);
        results
    }

    /// Unidade de trabalho por candidato: score, fetch com delay de
    /// cortesia, excerpt, resumo. Infalível por contrato.
    async fn evaluate_candidate(
        &self,
        position: usize,
        candidate: &CandidateSource,
    ) -> EvaluatedSource {
        // Score primeiro: rápido, local, não bloqueia.
        let credibility = score_url(&candidate.url);

        // Delay de cortesia por unidade antes do fetch.
        if self.config.fetch_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.fetch_delay_ms)).await;
        }

        let fetched = self.fetcher.fetch(&candidate.url).await;

        let excerpt = fetched
            .content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
            .map(|content| truncate_chars(content, self.config.excerpt_max_chars).to_string())
            .unwrap_or_else(|| NO_CONTENT_PLACEHOLDER.to_string());

        let summary = self.summarizer.summarize(&excerpt, &fetched.title).await;
        // Invariante: summary nunca é vazio no EvaluatedSource.
        let summary = if summary.trim().is_empty() {
            "Summary unavailable: empty response".to_string()
        } else {
            summary
        };

        let title = if fetched.success && !fetched.title.trim().is_empty() {
            fetched.title.clone()
        } else if !candidate.title.trim().is_empty() {
            candidate.title.clone()
        } else {
            candidate.url.clone()
        };

        self.status.push(format!(
            "{} {} scored {:.1}/3.0",
            credibility.level.emoji(),
            candidate.url,
            credibility.score
        ));

        EvaluatedSource {
            // Rank provisório = posição original na busca; reatribuído
            // após a ordenação final.
            rank: position + 1,
            title,
            url: candidate.url.clone(),
            summary,
            credibility_score: credibility.score,
            credibility_reason: credibility.reason,
            content_available: fetched.success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::MockFetcher;
    use crate::search::MockSearchClient;
    use crate::summarizer::MockSummarizer;
    use crate::types::FetchedContent;

    fn quick_config() -> CheckerConfig {
        CheckerConfig {
            fetch_delay_ms: 0,
            ..Default::default()
        }
    }

    fn checker_with_search(search: Arc<MockSearchClient>) -> CredibilityChecker {
        CredibilityChecker::new(
            search,
            Arc::new(MockFetcher::new()),
            Arc::new(MockSummarizer::new()),
        )
        .with_config(quick_config())
    }

    #[test]
    fn test_search_strategies_shape() {
        let strategies = search_strategies("quantum computing");
        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[0], "\"quantum computing\" academic research");
        assert!(strategies[1].contains("site:arxiv.org"));
        assert!(strategies[2].contains("filetype:pdf"));
    }

    #[tokio::test]
    async fn test_discover_dedups_and_keeps_first_seen() {
        let duplicated = vec![
            CandidateSource::new("https://a.edu/x", "A", ""),
            CandidateSource::new("https://b.org/y", "B", ""),
            CandidateSource::new("https://a.edu/x", "A again", ""),
        ];
        let search = Arc::new(MockSearchClient::with_results(duplicated));
        let checker = checker_with_search(search.clone());

        let candidates = checker.discover_sources("test").await;

        let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.edu/x", "https://b.org/y"]);
        assert_eq!(candidates[0].title, "A");
        assert_eq!(candidates[0].strategy_label, "Strategy 1");
    }

    #[tokio::test]
    async fn test_discover_caps_at_max_sources() {
        let many: Vec<CandidateSource> = (0..20)
            .map(|i| CandidateSource::new(format!("https://site{}.org", i), "", ""))
            .collect();
        let search = Arc::new(MockSearchClient::with_results(many));
        let checker = checker_with_search(search);

        let candidates = checker.discover_sources("test").await;
        assert_eq!(candidates.len(), 7);
    }

    #[tokio::test]
    async fn test_fallback_fires_only_when_ladder_is_empty() {
        // Nenhum override: todas as estratégias voltam vazio, só a query
        // crua responde.
        let search = Arc::new(MockSearchClient::new().with_override(
            "obscure topic",
            vec![CandidateSource::new("https://obscure.org/page", "", "")],
        ));
        let checker = checker_with_search(search.clone());

        let candidates = checker.discover_sources("obscure topic").await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].strategy_label, "Fallback");
        // 3 estratégias + 1 fallback
        assert_eq!(search.seen().len(), 4);
        assert_eq!(search.seen()[3], "obscure topic");
    }

    #[tokio::test]
    async fn test_fallback_skipped_when_strategy_hits() {
        let search = Arc::new(MockSearchClient::with_results(vec![
            CandidateSource::new("https://found.edu/paper", "", ""),
        ]));
        let checker = checker_with_search(search.clone());

        let candidates = checker.discover_sources("common topic").await;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].strategy_label, "Strategy 1");
        assert!(!search.seen().contains(&"common topic".to_string()));
    }

    #[tokio::test]
    async fn test_total_search_failure_yields_empty_success() {
        let checker = checker_with_search(Arc::new(MockSearchClient::failing()));

        let result = checker.process_query("anything").await;

        assert!(result.success);
        assert!(result.sources.is_empty());
        assert!(result.error.is_none());
        assert!(result
            .status_log
            .iter()
            .any(|entry| entry.contains("No search results found")));
    }

    #[tokio::test]
    async fn test_evaluate_candidate_prefers_fetched_title() {
        let fetcher = MockFetcher::with_content(FetchedContent {
            title: "Fetched Title".into(),
            content: Some("body".into()),
            success: true,
        });
        let checker = CredibilityChecker::new(
            Arc::new(MockSearchClient::new()),
            Arc::new(fetcher),
            Arc::new(MockSummarizer::new()),
        )
        .with_config(quick_config());

        let candidate = CandidateSource::new("https://example.edu/a", "Search Title", "");
        let evaluated = checker.evaluate_candidate(0, &candidate).await;

        assert_eq!(evaluated.title, "Fetched Title");
        assert!(evaluated.content_available);
    }

    #[tokio::test]
    async fn test_evaluate_candidate_falls_back_to_search_title() {
        let checker = CredibilityChecker::new(
            Arc::new(MockSearchClient::new()),
            Arc::new(MockFetcher::failing()),
            Arc::new(MockSummarizer::new()),
        )
        .with_config(quick_config());

        let candidate = CandidateSource::new("https://example.edu/a", "Search Title", "");
        let evaluated = checker.evaluate_candidate(0, &candidate).await;

        assert_eq!(evaluated.title, "Search Title");
        assert!(!evaluated.content_available);
        assert!(!evaluated.summary.is_empty());
    }

    #[tokio::test]
    async fn test_status_log_has_start_and_completion_events() {
        let checker = checker_with_search(Arc::new(MockSearchClient::with_results(vec![
            CandidateSource::new("https://example.org/a", "", ""),
        ])));

        let result = checker.process_query("test").await;

        assert!(result.status_log[0].contains("Starting academic source credibility check"));
        assert!(result
            .status_log
            .last()
            .unwrap()
            .contains("credibility check completed"));
    }
}
