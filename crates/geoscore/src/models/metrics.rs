//! Named sub-metrics gathered during analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::semantic::SemanticTriple;

/// All metrics for one analyzed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBundle {
    pub sentence_length: SentenceLengthMetrics,
    pub claim_density: ClaimDensityMetrics,
    pub date_markers: DateMarkerMetrics,
    pub structure: StructureMetrics,
    pub semantic_triples: SemanticTripleMetrics,
    pub entities: EntityMetrics,
    pub query_alignment: QueryAlignmentMetrics,
    /// Present only after semantic augmentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceLengthMetrics {
    pub average: f64,
    pub target: f64,
    /// First few sentences over the length threshold.
    pub problematic: Vec<ProblematicSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicSentence {
    pub sentence: String,
    pub word_count: usize,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDensityMetrics {
    /// Claims per 100 words.
    pub current: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMarkerMetrics {
    pub found: usize,
    pub recommended: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureMetrics {
    pub heading_count: usize,
    pub list_count: usize,
    pub avg_section_length: f64,
    pub has_table_of_contents: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTripleMetrics {
    pub total: usize,
    pub density: usize,
    /// Mean triple confidence, two decimals.
    pub quality: f64,
    pub examples: Vec<SemanticTriple>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetrics {
    pub total: usize,
    pub density: usize,
    /// Number of distinct entity types.
    pub diversity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAlignmentMetrics {
    pub primary_query: String,
    pub latent_intents: Vec<LatentIntent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatentIntent {
    pub intent: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Query-term coverage on a 0-10 scale.
    pub coverage: u32,
}

/// Semantic judgments carried over from the extraction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSummary {
    pub relevance: f64,
    pub coherent: bool,
    pub self_contained: bool,
    pub missing_context: Vec<String>,
    pub average_importance: f64,
    pub entity_types: BTreeMap<String, usize>,
    pub used_fallback: bool,
}
