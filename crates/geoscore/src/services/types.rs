//! Requests and reports of the analysis service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    ComparisonResult, CompetitorSummary, ContentDocument, DocumentFailure, RewriteDelta,
    UnifiedAnalysis,
};

/// Feature tag for the deterministic pass.
pub const FEATURE_PATTERN: &str = "pattern-analysis";
/// Feature tag for caller-supplied text.
pub const FEATURE_TEXT_INPUT: &str = "text-input";
/// Feature tag for a successful semantic extraction.
pub const FEATURE_SEMANTIC: &str = "llm-semantic-analysis";
/// Prefix of the feature tag recorded when extraction fell back.
pub const FEATURE_FALLBACK_PREFIX: &str = "llm-fallback: ";

pub const DEFAULT_TEXT_TITLE: &str = "Optimized Content";
pub const DEFAULT_TEXT_URL: &str = "text://optimized-content";

/// Options for a single-document analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    /// Model overriding the generator default.
    #[serde(default)]
    pub ai_model: Option<String>,
    /// Competitor pages to summarise. Takes precedence over auto-discovery.
    #[serde(default)]
    pub competitor_urls: Vec<String>,
    /// Search for competitor pages with the target query.
    #[serde(default)]
    pub auto_discover_competitors: bool,
    /// Run semantic extraction. `false` requests a pattern-only analysis.
    #[serde(default = "default_semantic")]
    pub semantic: bool,
}

fn default_semantic() -> bool {
    true
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            ai_model: None,
            competitor_urls: Vec::new(),
            auto_discover_competitors: false,
            semantic: default_semantic(),
        }
    }
}

impl AnalyzeOptions {
    pub fn with_model(mut self, model: Option<&str>) -> Self {
        self.ai_model = model.map(String::from);
        self
    }

    pub fn pattern_only(mut self) -> Self {
        self.semantic = false;
        self
    }
}

/// Options for analysing caller-supplied text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default = "default_semantic")]
    pub semantic: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            title: None,
            url: None,
            ai_model: None,
            semantic: default_semantic(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    pub url: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitor_urls: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

/// Summaries of competitor pages read alongside the main document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorReport {
    pub query: String,
    pub retrieved_at: DateTime<Utc>,
    pub analyses: Vec<CompetitorSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub version: String,
    pub processing_time_ms: u64,
    pub features_used: Vec<String>,
}

impl ReportMeta {
    /// Whether semantic extraction fell back for this report.
    pub fn used_fallback(&self) -> bool {
        self.features_used
            .iter()
            .any(|f| f.starts_with(FEATURE_FALLBACK_PREFIX))
    }
}

/// Result of analysing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request: RequestInfo,
    pub document: ContentDocument,
    pub analysis: UnifiedAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitors: Option<CompetitorReport>,
    pub meta: ReportMeta,
}

/// Ranking of several URLs for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub comparison: ComparisonResult,
    pub processing_time_ms: u64,
}

/// Before/after comparison of a page and its rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteValidation {
    pub query: String,
    pub original_url: String,
    pub title: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub delta: RewriteDelta,
    pub processing_time_ms: u64,
}
