//! LLM wire types and errors

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Chat completion wire format (OpenAI-compatible)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }
}

/// Pull `choices[0].message.content` out of a completion body.
///
/// Any missing or mistyped segment yields an empty string.
pub fn first_choice_content(body: &serde_json::Value) -> &str {
    body.pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Missing AI_API_KEY env var. Set it in the environment (or in .env / .env.local).")]
    MissingApiKey,

    #[error("AI error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("AI request failed: {0}")]
    Transport(String),

    #[error("AI request timed out after {0}s")]
    Timeout(u64),

    #[error("AI response is not valid JSON: {0}")]
    InvalidResponse(String),

    #[error("Empty AI response")]
    EmptyResponse,
}
