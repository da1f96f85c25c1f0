//! HTTP request handlers for the API server.

mod analyze;
mod api_types;

pub use analyze::{analyze, analyze_text, compare, health, not_found, validate_rewrite};
pub use api_types::{ApiResponse, EmptyContext, ErrorData};
