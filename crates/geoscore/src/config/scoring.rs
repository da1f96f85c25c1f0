//! Scoring, extraction and limit settings.
//!
//! Every constant the analyzers use lives here so that an engine can be
//! built with a different configuration without touching global state.

use serde::{Deserialize, Serialize};

/// Constants for the deterministic pattern pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Target average sentence length, in words.
    pub sentence_target: f64,
    /// Sentences above this word count are reported as problematic.
    pub problematic_sentence_words: usize,
    /// Maximum number of sample items kept per metric.
    pub sample_cap: usize,
    /// Target claims per 100 words.
    pub claim_density_target: f64,
    /// Minimum recommended number of date-bearing sentences.
    pub date_marker_floor: usize,
    /// Recommended date-bearing sentences as a share of all sentences.
    pub date_marker_ratio: f64,
    /// Readability points per heading.
    pub heading_weight: f64,
    /// Characters per simulated chunk.
    pub chunk_size: usize,
    /// Number of simulated chunks reported.
    pub chunk_cap: usize,
    /// Placeholder coherence assigned to simulated chunks.
    pub chunk_coherence: f64,
    /// Tokens estimated per word.
    pub token_factor: f64,
    /// Average sentence length above which simplification is recommended.
    pub long_sentence_threshold: f64,
    /// Heading count below which structural work is recommended.
    pub min_headings: usize,
    /// Lead, in points, before a winning dimension counts as a key difference.
    pub key_difference_margin: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sentence_target: 20.0,
            problematic_sentence_words: 30,
            sample_cap: 5,
            claim_density_target: 4.0,
            date_marker_floor: 5,
            date_marker_ratio: 0.1,
            heading_weight: 2.0,
            chunk_size: 500,
            chunk_cap: 3,
            chunk_coherence: 0.8,
            token_factor: 1.3,
            long_sentence_threshold: 25.0,
            min_headings: 3,
            key_difference_margin: 1.0,
        }
    }
}

/// Settings for semantic extraction and for merging its result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Characters of content sent to the model.
    pub content_budget: usize,
    pub max_tokens: u32,
    pub temperature: f32,
    pub max_triples: usize,
    pub max_entities: usize,
    pub max_missing_context: usize,
    pub default_confidence: f64,
    pub default_importance: f64,
    pub default_relevance: f64,
    /// Chunk coherence reported when the model judged the content coherent.
    pub coherent_chunk_score: f64,
    /// Chunk coherence reported otherwise.
    pub incoherent_chunk_score: f64,
    /// Citability points per extracted triple.
    pub triple_citability_weight: f64,
    /// Extracted entities per citability point.
    pub entities_per_citability_point: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            content_budget: 2000,
            max_tokens: 1500,
            temperature: 0.1,
            max_triples: 10,
            max_entities: 15,
            max_missing_context: 5,
            default_confidence: 0.7,
            default_importance: 0.5,
            default_relevance: 0.5,
            coherent_chunk_score: 0.9,
            incoherent_chunk_score: 0.7,
            triple_citability_weight: 2.0,
            entities_per_citability_point: 2.0,
        }
    }
}

/// Input limits enforced at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum characters of caller-supplied content.
    pub max_content_chars: usize,
    pub min_compare: usize,
    pub max_compare: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_content_chars: 1_000_000,
            min_compare: 2,
            max_compare: 5,
        }
    }
}
