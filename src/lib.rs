//! # Cred Checker - Avaliador de Credibilidade de Fontes
//!
//! Este crate implementa um verificador de credibilidade de fontes
//! acadêmicas: dado uma query de pesquisa, ele busca, extrai, resume,
//! pontua e ranqueia um conjunto pequeno de URLs candidatas.
//!
//! ## Como funciona?
//!
//! 1. Recebe uma query de pesquisa
//! 2. Descobre fontes candidatas via estratégias de busca acadêmicas
//! 3. Em paralelo, pontua cada URL e extrai + resume seu conteúdo
//! 4. Ordena por score de credibilidade e reatribui ranks 1..N
//! 5. Retorna um `QueryResult` estruturado com log de progresso
//!
//! ## Arquitetura Principal
//!
//! O sistema é composto por dois núcleos e três colaboradores:
//!
//! ### Núcleo 1: Scorer de Credibilidade (`credibility`)
//! Função pura URL → (score, explicação) baseada em tabelas estáticas de
//! sinais: tiers de autoridade de domínio, penalidade para plataformas de
//! baixa credibilidade e bônus aditivos (https, path acadêmico, DOI...).
//! Score sempre em [0.0, 3.0], determinístico, nunca falha.
//!
//! ### Núcleo 2: Orquestrador (`checker`)
//! Fan-out/fan-in com pool limitado de workers: cada candidato é avaliado
//! em uma unidade independente; falhas de colaborador viram sentinelas e
//! nunca derrubam a query. Apenas falha de orquestração produz
//! `success: false`.
//!
//! ### Colaboradores (`search`, `fetcher`, `summarizer`)
//! Traits async com implementações reais (DuckDuckGo, HTTP + Readability,
//! OpenAI) e mocks para testes.
//!
//! ## Exemplo de Uso
//!
//! ```rust,ignore
//! use cred_checker::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = CredibilityChecker::new(
//!         Arc::new(DuckDuckGoClient::new()),
//!         Arc::new(HttpFetcher::new()),
//!         Arc::new(OpenAiSummarizer::new(load_llm_config())),
//!     );
//!
//!     let result = checker.process_query("machine learning algorithms").await;
//!     for source in &result.sources {
//!         println!("#{} {:.1}/3.0 {}", source.rank, source.credibility_score, source.url);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos fundamentais compartilhados por todo o sistema.
///
/// Este módulo define as estruturas de dados básicas como:
/// - [`CandidateSource`]: candidato descoberto pela busca
/// - [`FetchedContent`]: conteúdo extraído de uma URL
/// - [`CredibilityResult`]: score + explicação de uma URL
/// - [`EvaluatedSource`]: fonte avaliada e ranqueada
/// - [`QueryResult`]: resultado completo de uma query
pub mod types;

/// Scorer de credibilidade baseado em regras.
///
/// Tabelas estáticas de sinais de domínio/path e a função pura
/// [`score_url`](credibility::score_url). Nunca falha: entradas inválidas
/// degradam para scores de baixa confiança.
pub mod credibility;

/// Orquestrador do pipeline de avaliação.
///
/// O coração do sistema. Contém [`CredibilityChecker`], que dirige
/// busca → fan-out concorrente → ordenação → ranking, com log de status
/// e captura única de falhas de orquestração.
pub mod checker;

/// Clientes para busca de fontes candidatas.
///
/// Define a trait `SearchClient` e implementações:
/// - DuckDuckGo (endpoint HTML)
/// - Mock para testes
pub mod search;

/// Fetchers de conteúdo de URLs.
///
/// Define a trait `ContentFetcher` e implementações:
/// - HTTP + Readability com fallback html2text e suporte a PDF
/// - Mock para testes
///
/// Contrato: fetch nunca propaga erro; falhas viram `success: false`.
pub mod fetcher;

/// Summarizers de conteúdo extraído.
///
/// Define a trait `Summarizer` e implementações:
/// - OpenAI chat completions
/// - Mock para testes
///
/// Contrato: nunca propaga erro e nunca retorna string vazia.
pub mod summarizer;

/// Log de status append-only com sink de progresso injetável.
pub mod status;

/// Configuração do pipeline e do LLM.
///
/// Fornece configuração dinâmica via variáveis de ambiente:
///
/// **Pipeline:**
/// - `CHECKER_MAX_SOURCES`: máximo de candidatos por query (padrão: 7)
/// - `CHECKER_WORKERS`: workers concorrentes (padrão: 4)
/// - `CHECKER_FETCH_DELAY_MS`: delay de cortesia por fetch (padrão: 500)
/// - `CHECKER_EXCERPT_CHARS`: tamanho do excerpt (padrão: 1500)
///
/// **LLM:**
/// - `OPENAI_API_KEY`: chave da API
/// - `LLM_MODEL`: modelo de chat (padrão: "gpt-4o")
/// - `LLM_API_BASE_URL`: URL base customizada (opcional)
/// - `LLM_MAX_TOKENS`: máximo de tokens do resumo (padrão: 200)
/// - `LLM_TEMPERATURE`: temperatura (padrão: 0.3)
pub mod config;

/// Utilitários diversos.
///
/// Funções auxiliares usadas em todo o sistema:
/// - Truncation segura de texto
/// - Cleaning e contagem de palavras
pub mod utils;

// Re-exports principais
pub use checker::CredibilityChecker;
pub use config::{load_checker_config, load_llm_config, CheckerConfig, LlmConfig};
pub use credibility::score_url;
pub use status::{LogSink, StatusLog, StatusSink};
pub use types::*;

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// Importar tudo de uma vez:
/// ```rust,ignore
/// use cred_checker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::checker::CredibilityChecker;
    pub use crate::config::{load_checker_config, load_llm_config, CheckerConfig, LlmConfig};
    pub use crate::credibility::score_url;
    pub use crate::fetcher::{ContentFetcher, HttpFetcher, MockFetcher};
    pub use crate::search::{DuckDuckGoClient, MockSearchClient, SearchClient};
    pub use crate::status::{LogSink, StatusSink};
    pub use crate::summarizer::{MockSummarizer, OpenAiSummarizer, Summarizer};
    pub use crate::types::*;
}
