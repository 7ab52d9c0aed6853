// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FETCHER DE CONTEÚDO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Trait e implementações para extração de conteúdo de URLs.
// Download via reqwest, extração via Readability com fallback html2text,
// e extração de texto para PDFs.
//
// Contrato: fetch nunca propaga erro. Toda falha vira um FetchedContent
// sentinela com success: false.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::time::Duration;

use crate::types::FetchedContent;
use crate::utils::{clean_text, truncate_chars, word_count};

/// Erros internos do fetcher (convertidos em sentinela antes de sair).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("PDF extraction failed: {0}")]
    PdfExtractionError(String),

    #[error("No content could be extracted")]
    EmptyContent,
}

/// Trait principal para fetchers de conteúdo.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Extrai título e texto principal de uma URL.
    ///
    /// Nunca falha: todos os modos de erro retornam `success: false` com o
    /// diagnóstico no título.
    async fn fetch(&self, url: &str) -> FetchedContent;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO HTTP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

static TITLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").expect("invalid title regex"));

static OG_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*property=["']og:title["'][^>]*content=["']([^"']+)["']"#)
        .expect("invalid og:title regex")
});

static H1_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h1[^>]*>([^<]+)</h1>").expect("invalid h1 regex"));

static FILE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.[a-z]{2,4}$").expect("invalid extension regex"));

/// Fetcher real sobre HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
    max_content_chars: usize,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_max_content(3000)
    }

    /// Cria um fetcher com limite customizado de caracteres retidos.
    pub fn with_max_content(max_content_chars: usize) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_content_chars,
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<FetchedContent, FetchError> {
        let parsed =
            url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", "Mozilla/5.0 (compatible; CredChecker/1.0)")
            .send()
            .await
            .map_err(|e| FetchError::DownloadError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::DownloadError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if is_pdf(&parsed, &content_type) {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| FetchError::DownloadError(e.to_string()))?;
            return self.extract_pdf(&parsed, bytes.to_vec()).await;
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::DownloadError(e.to_string()))?;

        self.extract_html(&parsed, &html)
    }

    /// Extração de páginas HTML: Readability primeiro, html2text como
    /// fallback quando a Readability não encontra conteúdo principal.
    fn extract_html(
        &self,
        parsed: &url::Url,
        html: &str,
    ) -> Result<FetchedContent, FetchError> {
        let mut title = String::new();
        let mut text = String::new();

        // Readability isola o conteúdo principal; o HTML limpo resultante
        // ainda precisa virar texto puro.
        if let Ok(product) = readability::extractor::extract(&mut html.as_bytes(), parsed) {
            title = product.title.trim().to_string();
            text = clean_text(&html2text::from_read(product.content.as_bytes(), 120));
        }

        if text.is_empty() {
            text = clean_text(&html2text::from_read(html.as_bytes(), 120));
        }

        if text.is_empty() {
            return Err(FetchError::EmptyContent);
        }

        log::debug!("📖 {} palavras extraídas de {}", word_count(&text), parsed);

        if title.len() <= 5 {
            title = title_from_html(html)
                .unwrap_or_else(|| title_from_url(parsed));
        }

        Ok(FetchedContent {
            title,
            content: Some(self.cap_content(text)),
            success: true,
        })
    }

    /// Extração de PDFs; pdf-extract é síncrono, então roda em
    /// spawn_blocking para não travar o runtime.
    async fn extract_pdf(
        &self,
        parsed: &url::Url,
        bytes: Vec<u8>,
    ) -> Result<FetchedContent, FetchError> {
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
        })
        .await
        .map_err(|e| FetchError::PdfExtractionError(e.to_string()))?
        .map_err(|e| FetchError::PdfExtractionError(e.to_string()))?;

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(FetchError::EmptyContent);
        }

        Ok(FetchedContent {
            title: title_from_url(parsed),
            content: Some(self.cap_content(text)),
            success: true,
        })
    }

    fn cap_content(&self, text: String) -> String {
        if text.len() > self.max_content_chars {
            format!(
                "{}... [content truncated]",
                truncate_chars(&text, self.max_content_chars)
            )
        } else {
            text
        }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchedContent {
        match self.try_fetch(url).await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("📄 Fetch falhou para {}: {}", url, e);
                FetchedContent::unavailable(format!("Failed to extract content: {}", e))
            }
        }
    }
}

/// Detecta PDF pelo content-type ou pela extensão do path.
fn is_pdf(parsed: &url::Url, content_type: &str) -> bool {
    if content_type.contains("application/pdf") {
        return true;
    }
    mime_guess::from_path(parsed.path())
        .first()
        .map(|mime| mime == mime_guess::mime::APPLICATION_PDF)
        .unwrap_or(false)
}

/// Fallbacks de título dentro do HTML: <title>, og:title, <h1>.
fn title_from_html(html: &str) -> Option<String> {
    for pattern in [&*TITLE_TAG, &*OG_TITLE, &*H1_TAG] {
        if let Some(cap) = pattern.captures(html) {
            let title = cap[1].trim().to_string();
            if title.len() > 5 {
                return Some(title);
            }
        }
    }
    None
}

/// Último recurso: deriva um título do path da URL, ou do host.
fn title_from_url(parsed: &url::Url) -> String {
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or("");

    if !segment.is_empty() {
        let decoded = urlencoding::decode(segment)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        let cleaned = FILE_EXTENSION.replace(&decoded, "");
        let cleaned = cleaned.replace('-', " ").replace('_', " ").trim().to_string();
        if cleaned.len() > 5 {
            return cleaned;
        }
    }

    format!(
        "Document from {}",
        parsed.host_str().unwrap_or("unknown source")
    )
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO MOCK PARA TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Fetcher mock com conteúdo configurável por URL.
#[derive(Default)]
pub struct MockFetcher {
    pub default_content: Option<FetchedContent>,
    pub overrides: HashMap<String, FetchedContent>,
    pub fail_all: bool,
    pub delay_ms: Option<u64>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock que devolve o mesmo conteúdo para qualquer URL.
    pub fn with_content(content: FetchedContent) -> Self {
        Self {
            default_content: Some(content),
            ..Default::default()
        }
    }

    /// Mock em que todo fetch falha.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    /// Define o conteúdo retornado para uma URL exata.
    pub fn with_override(mut self, url: impl Into<String>, content: FetchedContent) -> Self {
        self.overrides.insert(url.into(), content);
        self
    }

    /// Simula latência de rede fixa por fetch.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchedContent {
        if let Some(delay) = self.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if self.fail_all {
            return FetchedContent::unavailable("Failed to extract content: mock failure");
        }

        if let Some(content) = self.overrides.get(url) {
            return content.clone();
        }

        self.default_content.clone().unwrap_or_else(|| FetchedContent {
            title: "Mock Title".into(),
            content: Some("Mock content from URL".into()),
            success: true,
        })
    }
}
