//! FirstLine backend
//!
//! One endpoint, `POST /api/generate`, turns a prospect description into ten
//! one-line cold email openers via an OpenAI-compatible completion API.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::health::HealthResponse;
use crate::models::{GenerationRequest, GenerationResponse};
use crate::services::CompletionClient;
use crate::utils::error::ApiErrorResponse;

/// Shared, read-only application state
pub struct AppState {
    pub completion_client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::generate::generate, handlers::health::health_check),
    components(schemas(GenerationRequest, GenerationResponse, ApiErrorResponse, HealthResponse)),
    tags(
        (name = "Generation", description = "Cold email opener generation"),
        (name = "System", description = "Service health")
    ),
    info(title = "FirstLine API", description = "Cold email openers that sound human.")
)]
pub struct ApiDoc;

/// Build the HTTP router.
///
/// When `web_root` is given, unmatched paths are served from that directory.
pub fn build_router(state: Arc<AppState>, web_root: Option<&str>) -> Router {
    let api = Router::new()
        .route("/api/generate", post(handlers::generate::generate))
        .route("/health", get(handlers::health::health_check))
        .with_state(state);

    let mut app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api);

    if let Some(root) = web_root {
        app = app.fallback_service(ServeDir::new(root));
    }

    app.layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive())
}
