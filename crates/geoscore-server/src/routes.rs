//! Router configuration for the API server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Request bodies may carry up to a million characters of text.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/analyze-text", post(handlers::analyze_text))
        .route("/api/compare", post(handlers::compare))
        .route("/api/validate-rewrite", post(handlers::validate_rewrite))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
