//! Analysis endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use geoscore::services::{AnalyzeOptions, TextOptions};

use super::api_types::{
    bad_request, geo_error, AnalyzeRequest, AnalyzeTextRequest, ApiResponse, CompareRequest,
    HealthResponse, ValidateRewriteRequest,
};
use crate::AppState;

/// Liveness probe.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::ok(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        llm_configured: state.analyzer.has_generator(),
    })
}

/// Analyze a URL, optionally alongside competitor pages.
pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return bad_request(e.body_text()).into_response(),
    };

    let options = AnalyzeOptions {
        ai_model: body.ai_model,
        competitor_urls: body.competitor_urls,
        auto_discover_competitors: body.auto_discover_competitors,
        ..AnalyzeOptions::default()
    };
    match state
        .analyzer
        .analyze_url(&body.url, &body.query, &options)
        .await
    {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e) => geo_error(e).into_response(),
    }
}

/// Analyze text supplied in the request body.
pub async fn analyze_text(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return bad_request(e.body_text()).into_response(),
    };

    let options = TextOptions {
        title: body.title,
        url: body.url,
        ai_model: body.ai_model,
        ..TextOptions::default()
    };
    match state
        .analyzer
        .analyze_raw_text(&body.content, &body.query, &options)
        .await
    {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e) => geo_error(e).into_response(),
    }
}

/// Rank several URLs for one query.
pub async fn compare(
    State(state): State<AppState>,
    body: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return bad_request(e.body_text()).into_response(),
    };

    match state
        .analyzer
        .compare_urls(&body.urls, &body.query, body.ai_model.as_deref())
        .await
    {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e) => geo_error(e).into_response(),
    }
}

/// Score a rewrite against the page it replaces.
pub async fn validate_rewrite(
    State(state): State<AppState>,
    body: Result<Json<ValidateRewriteRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(e) => return bad_request(e.body_text()).into_response(),
    };

    match state
        .analyzer
        .validate_rewrite(
            &body.original_url,
            &body.optimized_content,
            &body.target_query,
            body.title.as_deref(),
            body.ai_model.as_deref(),
        )
        .await
    {
        Ok(validation) => ApiResponse::ok(validation).into_response(),
        Err(e) => geo_error(e).into_response(),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    ApiResponse::error(StatusCode::NOT_FOUND, "Not found")
}
