//! Ranking and before/after comparison records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::{Recommendation, UnifiedAnalysis};
use super::scores::GeoScores;

/// A document that could not be analyzed, with its cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub url: String,
    pub error: String,
}

impl std::fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.url, self.error)
    }
}

/// Input to ranking: a document reference and its analysis.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub url: String,
    pub analysis: UnifiedAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub url: String,
    pub rank: usize,
    pub is_winner: bool,
    pub scores: GeoScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_recommendation: Option<String>,
    /// Up to five recommendations for this document.
    pub improvement_areas: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub url: String,
    pub overall_score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub score_range: ScoreRange,
    pub average_score: f64,
    pub key_differences: Vec<String>,
}

/// Documents ranked by overall score, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub query: String,
    pub analyzed_at: DateTime<Utc>,
    pub results: Vec<RankedEntry>,
    pub winner: Winner,
    pub insights: Insights,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDelta {
    pub delta: f64,
    pub delta_percent: i64,
    pub improved: bool,
}

/// Per-dimension change between two score records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaResult {
    pub overall: ScoreDelta,
    pub extractability: ScoreDelta,
    pub readability: ScoreDelta,
    pub citability: ScoreDelta,
    /// Dimensions that did not improve.
    pub regressions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub before: f64,
    pub after: f64,
    /// Signed percentage, e.g. "+25%" or "-10%".
    pub improvement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparisons {
    pub claim_density: MetricComparison,
    pub avg_sentence_length: MetricComparison,
    pub list_structures: MetricComparison,
    pub entity_density: MetricComparison,
}

/// Before/after comparison of an original document and its rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteDelta {
    pub improved: bool,
    pub before: GeoScores,
    pub after: GeoScores,
    pub improvements: DeltaResult,
    pub metrics: MetricComparisons,
    pub recommendations_before: Vec<Recommendation>,
    pub recommendations_after: Vec<Recommendation>,
    pub next_steps: Vec<String>,
}
