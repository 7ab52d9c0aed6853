// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CLIENTE DE BUSCA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Trait e implementações para descoberta de fontes candidatas.
// Implementação real sobre o endpoint HTML do DuckDuckGo.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::types::CandidateSource;

/// Erros do cliente de busca
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Result extraction failed: {0}")]
    ExtractionError(String),
}

/// Trait principal para clientes de busca.
///
/// Queries vazias ou não suportadas devem resultar em `Ok(vec![])`, nunca em
/// erro: o orquestrador trata falhas de estratégia com skip-and-continue.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Busca fontes candidatas para uma query.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateSource>, SearchError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO DUCKDUCKGO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

static RESULT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("invalid result link regex")
});

static RESULT_SNIPPET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)
        .expect("invalid snippet regex")
});

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("invalid tag regex"));

/// Cliente para o endpoint HTML do DuckDuckGo.
///
/// O endpoint serve resultados como HTML estático; os links passam por um
/// redirecionador com a URL de destino no parâmetro `uddg`.
pub struct DuckDuckGoClient {
    endpoint: String,
    client: reqwest::Client,
}

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoClient {
    pub fn new() -> Self {
        Self {
            endpoint: "https://html.duckduckgo.com/html/".into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Resolve o href de um resultado para a URL de destino.
    fn resolve_result_url(href: &str) -> Option<String> {
        if let Some(pos) = href.find("uddg=") {
            let encoded = &href[pos + 5..];
            let encoded = encoded.split('&').next().unwrap_or(encoded);
            return urlencoding::decode(encoded).ok().map(|url| url.into_owned());
        }

        if href.starts_with("http") {
            Some(href.to_string())
        } else if let Some(rest) = href.strip_prefix("//") {
            Some(format!("https://{}", rest))
        } else {
            None
        }
    }

    /// Remove tags e decodifica as entidades mais comuns do HTML de resultado.
    fn strip_html(fragment: &str) -> String {
        let text = HTML_TAG.replace_all(fragment, "");
        text.replace("&amp;", "&")
            .replace("&quot;", "\"")
            .replace("&#x27;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&nbsp;", " ")
            .trim()
            .to_string()
    }

    fn parse_results(html: &str, max_results: usize) -> Vec<CandidateSource> {
        let snippets: Vec<String> = RESULT_SNIPPET
            .captures_iter(html)
            .map(|cap| Self::strip_html(&cap[1]))
            .collect();

        RESULT_LINK
            .captures_iter(html)
            .enumerate()
            .filter_map(|(i, cap)| {
                let url = Self::resolve_result_url(&cap[1])?;
                if url.is_empty() {
                    return None;
                }
                let title = Self::strip_html(&cap[2]);
                let snippet = snippets.get(i).cloned().unwrap_or_default();
                Some(CandidateSource::new(url, title, snippet))
            })
            .take(max_results)
            .collect()
    }
}

#[async_trait]
impl SearchClient for DuckDuckGoClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateSource>, SearchError> {
        if query.trim().is_empty() || max_results == 0 {
            return Ok(vec![]);
        }

        let url = format!("{}?q={}", self.endpoint, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0 (compatible; CredChecker/1.0)")
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::ExtractionError(e.to_string()))?;

        let results = Self::parse_results(&html, max_results);
        log::debug!("🔍 DuckDuckGo: {} resultados para '{}'", results.len(), query);
        Ok(results)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO MOCK PARA TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Cliente mock para testes unitários e de integração.
///
/// Retorna `default_results` para qualquer query, com overrides por query
/// exata; registra as queries recebidas para inspeção.
#[derive(Default)]
pub struct MockSearchClient {
    pub default_results: Vec<CandidateSource>,
    pub overrides: HashMap<String, Vec<CandidateSource>>,
    pub fail_all: bool,
    pub queries_seen: Mutex<Vec<String>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock que retorna os mesmos resultados para qualquer query.
    pub fn with_results(results: Vec<CandidateSource>) -> Self {
        Self {
            default_results: results,
            ..Default::default()
        }
    }

    /// Mock que falha em toda busca.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Define resultados específicos para uma query exata.
    pub fn with_override(
        mut self,
        query: impl Into<String>,
        results: Vec<CandidateSource>,
    ) -> Self {
        self.overrides.insert(query.into(), results);
        self
    }

    /// Queries recebidas até agora, em ordem.
    pub fn seen(&self) -> Vec<String> {
        self.queries_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<CandidateSource>, SearchError> {
        self.queries_seen.lock().unwrap().push(query.to_string());

        if self.fail_all {
            return Err(SearchError::ApiError("mock failure".into()));
        }

        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let results = self
            .overrides
            .get(query)
            .unwrap_or(&self.default_results)
            .iter()
            .take(max_results)
            .cloned()
            .collect();

        Ok(results)
    }
}
