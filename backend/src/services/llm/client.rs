//! OpenAI-compatible completion client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::models::{ChatCompletionRequest, ChatMessage, LLMError, first_choice_content};
use super::parser::parse_openers;
use super::scenarios::cold_opener::SYSTEM_PROMPT;
use crate::config::AiConfig;

const TEMPERATURE: f32 = 0.7;

/// Turns a prompt into a list of openers.
///
/// One attempt per call; failures are returned, never retried.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Vec<String>, LLMError>;

    /// Model name, for logging.
    fn model(&self) -> &str;
}

pub struct OpenAIClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
}

impl OpenAIClient {
    pub fn new(config: &AiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: TEMPERATURE,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> LLMError {
        if err.is_timeout() {
            LLMError::Timeout(self.timeout_secs)
        } else {
            LLMError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<Vec<String>, LLMError> {
        let api_key = self.api_key.as_deref().ok_or(LLMError::MissingApiKey)?;

        let url = self.endpoint();
        tracing::debug!("Calling completion endpoint {} (model: {})", url, self.model);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Completion request failed: {}", e);
                self.transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                tracing::warn!("Failed to read error body from completion endpoint: {}", e);
                String::new()
            });
            tracing::error!("Completion endpoint returned {}: {}", status, body);
            return Err(LLMError::Api { status: status.as_u16(), body });
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout(self.timeout_secs)
            } else {
                LLMError::InvalidResponse(e.to_string())
            }
        })?;

        let content = first_choice_content(&body);
        let openers = parse_openers(content);
        tracing::debug!(
            "Completion returned {} chars, {} openers after parsing",
            content.len(),
            openers.len()
        );

        if openers.is_empty() {
            return Err(LLMError::EmptyResponse);
        }

        Ok(openers)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
