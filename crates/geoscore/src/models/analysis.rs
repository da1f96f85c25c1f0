//! Analysis records: the pattern-pass result and the unified record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metrics::MetricBundle;
use super::scores::GeoScores;

/// Version tag stamped on every unified analysis.
pub const ANALYSIS_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub method: String,
    pub priority: Priority,
    pub location: String,
    pub current_text: String,
    pub suggested_text: String,
    pub rationale: String,
}

/// A fixed-size window of content with its (simulated) coherence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    pub content: String,
    pub semantic_coherence: f64,
    pub self_contained: bool,
    pub missing_context: Vec<String>,
    pub token_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunking {
    pub chunks: Vec<ContentChunk>,
    pub average_coherence: f64,
    pub problematic_boundaries: usize,
}

/// Output of the deterministic pattern pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAnalysis {
    pub scores: GeoScores,
    pub metrics: MetricBundle,
    pub chunking: Chunking,
    pub recommendations: Vec<Recommendation>,
}

/// Final scoring record for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedAnalysis {
    pub analyzed_at: DateTime<Utc>,
    pub version: String,
    pub target_query: String,
    pub scores: GeoScores,
    pub metrics: MetricBundle,
    pub chunking: Chunking,
    pub recommendations: Vec<Recommendation>,
}
