//! Service layer: the entry points used by the CLI and the HTTP server.

mod geo;
mod types;

pub use geo::GeoAnalyzer;
pub use types::{
    AnalysisReport, AnalyzeOptions, CompetitorReport, ComparisonReport, ReportMeta, RequestInfo,
    RewriteValidation, TextOptions, DEFAULT_TEXT_TITLE, DEFAULT_TEXT_URL, FEATURE_FALLBACK_PREFIX,
    FEATURE_PATTERN, FEATURE_SEMANTIC, FEATURE_TEXT_INPUT,
};
