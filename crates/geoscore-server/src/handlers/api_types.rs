//! Request bodies and the response envelope.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use geoscore::models::DocumentFailure;
use geoscore::GeoError;

/// Standard API response envelope.
///
/// Every endpoint returns this wrapper:
/// ```json
/// { "error": false, "context": {}, "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<C: Serialize, T: Serialize> {
    pub error: bool,
    pub context: C,
    pub data: T,
}

/// Empty context object.
#[derive(Debug, Default, Serialize)]
pub struct EmptyContext {}

/// Error payload inside the envelope.
#[derive(Debug, Serialize)]
pub struct ErrorData {
    pub message: String,
    /// Per-URL causes when several documents failed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<DocumentFailure>,
}

impl ApiResponse<EmptyContext, ErrorData> {
    pub fn error(status: StatusCode, message: impl Into<String>) -> impl IntoResponse {
        Self::error_with_failures(status, message, Vec::new())
    }

    pub fn error_with_failures(
        status: StatusCode,
        message: impl Into<String>,
        failures: Vec<DocumentFailure>,
    ) -> impl IntoResponse {
        (
            status,
            Json(ApiResponse {
                error: true,
                context: EmptyContext {},
                data: ErrorData {
                    message: message.into(),
                    failures,
                },
            }),
        )
    }
}

impl<T: Serialize> ApiResponse<EmptyContext, T> {
    pub fn ok(data: T) -> Json<ApiResponse<EmptyContext, T>> {
        Json(ApiResponse {
            error: false,
            context: EmptyContext {},
            data,
        })
    }
}

/// Map a service error to its status and envelope.
pub fn geo_error(err: GeoError) -> impl IntoResponse {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::warn!("Request failed: {}", err);
    } else {
        tracing::debug!("Rejected request: {}", err);
    }
    let message = err.to_string();
    let failures = err.failures().to_vec();
    ApiResponse::error_with_failures(status, message, failures)
}

pub fn bad_request(message: impl Into<String>) -> impl IntoResponse {
    ApiResponse::error(StatusCode::BAD_REQUEST, message)
}

/// `POST /api/analyze`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub url: String,
    pub query: String,
    pub competitor_urls: Vec<String>,
    pub auto_discover_competitors: bool,
    pub ai_model: Option<String>,
}

/// `POST /api/analyze-text`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeTextRequest {
    pub content: String,
    pub query: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub ai_model: Option<String>,
}

/// `POST /api/compare`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompareRequest {
    pub urls: Vec<String>,
    pub query: String,
    pub ai_model: Option<String>,
}

/// `POST /api/validate-rewrite`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateRewriteRequest {
    pub original_url: String,
    pub optimized_content: String,
    pub target_query: String,
    pub title: Option<String>,
    pub ai_model: Option<String>,
}

/// `GET /health`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub llm_configured: bool,
}
