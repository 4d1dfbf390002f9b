//! Opener Generation Handler

use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::AppState;
use crate::models::{GenerationRequest, GenerationResponse, first_validation_message};
use crate::services::llm::{build_prompt, detect_language};
use crate::utils::{ApiError, ApiResult};

/// Generate cold email openers
///
/// The body is parsed by hand so that malformed JSON is reported with the
/// same `{ "error": ... }` shape as every other failure.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated openers", body = GenerationResponse),
        (status = 400, description = "Invalid request body", body = crate::utils::error::ApiErrorResponse),
        (status = 500, description = "Missing configuration or completion failure", body = crate::utils::error::ApiErrorResponse)
    ),
    tag = "Generation"
)]
pub async fn generate(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);

    // Errors become responses inside the span so their log lines carry the id
    async move { run_generate(&state, &body).await.into_response() }
        .instrument(span)
        .await
}

async fn run_generate(state: &AppState, body: &[u8]) -> ApiResult<Json<GenerationResponse>> {
    let t0 = std::time::Instant::now();
    let req = parse_request(body)?;

    let language = detect_language(&req.detection_text());
    tracing::info!(
        "Generating openers (model: {}, language: {})",
        state.completion_client.model(),
        language
    );

    let prompt = build_prompt(&req.role, &req.company_type, &req.context, language);
    let openers = state.completion_client.complete(&prompt).await?;

    tracing::info!("Generated {} openers in {}ms", openers.len(), t0.elapsed().as_millis());
    Ok(Json(GenerationResponse { openers }))
}

/// Decode and validate a raw request body.
pub fn parse_request(body: &[u8]) -> ApiResult<GenerationRequest> {
    let req: GenerationRequest =
        serde_json::from_slice(body).map_err(|e| ApiError::validation(e.to_string()))?;

    req.validate()
        .map_err(|errors| ApiError::validation(first_validation_message(&errors)))?;

    Ok(req)
}
