// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SUMMARIZER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Trait e implementações para sumarização de conteúdo extraído.
// Implementação real sobre a API de chat da OpenAI.
//
// Contrato: summarize nunca propaga erro e nunca retorna string vazia;
// falhas internas viram "Summary unavailable: {motivo}".
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;

/// Erros internos do summarizer (absorvidos antes de sair da trait).
#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response format: {0}")]
    ParseError(String),

    #[error("Empty completion")]
    EmptyCompletion,
}

/// Trait principal para summarizers.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Gera um resumo curto do conteúdo.
    ///
    /// Nunca falha e nunca retorna string vazia.
    async fn summarize(&self, content: &str, title: &str) -> String;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO OPENAI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Summarizer sobre a API de chat completions da OpenAI.
pub struct OpenAiSummarizer {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OpenAiSummarizer {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn try_summarize(&self, content: &str, title: &str) -> Result<String, SummarizerError> {
        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Serialize)]
        struct ChatMessage {
            role: String,
            content: String,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatResponseMessage,
        }

        #[derive(Deserialize)]
        struct ChatResponseMessage {
            content: String,
        }

        let prompt = format!(
            "Please provide a concise, academic summary of the following content.\n\
             Focus on the main arguments, key findings, and relevance to academic research.\n\n\
             Title: {}\n\
             Content: {}",
            title, content
        );

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizerError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::ParseError(e.to_string()))?;

        let summary = chat_response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if summary.is_empty() {
            return Err(SummarizerError::EmptyCompletion);
        }

        Ok(summary)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, content: &str, title: &str) -> String {
        match self.try_summarize(content, title).await {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("📝 Sumarização falhou: {}", e);
                format!("Summary unavailable: {}", e)
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO MOCK PARA TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Summarizer mock para testes.
#[derive(Debug, Default)]
pub struct MockSummarizer {
    pub canned_summary: Option<String>,
    pub fail_all: bool,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock que devolve sempre o mesmo resumo.
    pub fn with_summary(summary: impl Into<String>) -> Self {
        Self {
            canned_summary: Some(summary.into()),
            fail_all: false,
        }
    }

    /// Mock cuja sumarização sempre falha internamente.
    pub fn failing() -> Self {
        Self {
            canned_summary: None,
            fail_all: true,
        }
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, content: &str, title: &str) -> String {
        if self.fail_all {
            return "Summary unavailable: mock failure".to_string();
        }

        self.canned_summary.clone().unwrap_or_else(|| {
            format!(
                "Mock summary of '{}' ({} chars of content)",
                title,
                content.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_summary_never_empty() {
        let summarizer = MockSummarizer::new();
        let summary = summarizer.summarize("some content", "A Title").await;
        assert!(!summary.is_empty());
        assert!(summary.contains("A Title"));
    }

    #[tokio::test]
    async fn test_mock_failing_yields_placeholder() {
        let summarizer = MockSummarizer::failing();
        let summary = summarizer.summarize("content", "title").await;
        assert_eq!(summary, "Summary unavailable: mock failure");
    }

    #[tokio::test]
    async fn test_openai_summarizer_absorbs_errors() {
        // Sem servidor escutando: a chamada falha e vira placeholder.
        let config = LlmConfig {
            api_key: "test-key".into(),
            base_url: "http://127.0.0.1:1".into(),
            ..Default::default()
        };
        let summarizer = OpenAiSummarizer::new(config);

        let summary = summarizer.summarize("content", "title").await;
        assert!(summary.starts_with("Summary unavailable:"));
    }
}
