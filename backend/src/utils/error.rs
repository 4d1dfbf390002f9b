use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::services::llm::LLMError;

/// API error returned by every handler.
///
/// Each variant maps to exactly one HTTP status. Messages are returned to the
/// caller verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed JSON, wrong shape, or out-of-range field (user-caused)
    #[error("{0}")]
    Validation(String),

    /// Operator-side misconfiguration such as a missing API key
    #[error("{0}")]
    Config(String),

    /// Completion endpoint failed, timed out, or returned unusable output
    #[error("{0}")]
    Upstream(String),

    #[error("Empty AI response")]
    EmptyResult,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Upstream(_) | Self::EmptyResult => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl From<LLMError> for ApiError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::MissingApiKey => Self::Config(err.to_string()),
            LLMError::EmptyResponse => Self::EmptyResult,
            LLMError::Api { .. }
            | LLMError::Transport(_)
            | LLMError::Timeout(_)
            | LLMError::InvalidResponse(_) => Self::Upstream(err.to_string()),
        }
    }
}

/// Error body: `{ "error": "<message>" }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed with {}: {}", status.as_u16(), self);
        } else {
            tracing::warn!("Request rejected with {}: {}", status.as_u16(), self);
        }

        let body = ApiErrorResponse { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
