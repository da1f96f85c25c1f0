//! Fuses the pattern pass with an optional semantic record.
//!
//! Only citability (and therefore overall) is recomputed from semantic
//! data. Extractability, readability and the recommendations always come
//! from the pattern pass unchanged.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::config::ExtractionConfig;
use crate::models::{
    round2, EntityMetrics, PatternAnalysis, SemanticOutcome, SemanticRecord, SemanticSummary,
    SemanticTripleMetrics, UnifiedAnalysis, ANALYSIS_VERSION,
};

/// Number of triples kept as illustrative examples.
const TRIPLE_EXAMPLES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ScoreMerger {
    config: ExtractionConfig,
}

impl ScoreMerger {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Produce the unified record for one document.
    pub fn merge(
        &self,
        pattern: PatternAnalysis,
        semantic: Option<&SemanticOutcome>,
    ) -> UnifiedAnalysis {
        let target_query = pattern.metrics.query_alignment.primary_query.clone();
        let PatternAnalysis {
            mut scores,
            mut metrics,
            mut chunking,
            recommendations,
        } = pattern;

        if let Some(outcome) = semantic {
            let record = outcome.record();

            metrics.semantic_triples = triple_metrics(record);
            metrics.entities = entity_metrics(record);
            metrics.semantic = Some(semantic_summary(record, outcome.is_fallback()));

            chunking.average_coherence = if record.coherence.coherent {
                self.config.coherent_chunk_score
            } else {
                self.config.incoherent_chunk_score
            };
            chunking.problematic_boundaries = record.coherence.missing_context.len();

            scores = scores.with_citability(semantic_citability(record, &self.config));
        }

        UnifiedAnalysis {
            analyzed_at: Utc::now(),
            version: ANALYSIS_VERSION.to_string(),
            target_query,
            scores,
            metrics,
            chunking,
            recommendations,
        }
    }
}

/// Citability from extracted facts: mean of triple and entity scores.
pub fn semantic_citability(record: &SemanticRecord, config: &ExtractionConfig) -> f64 {
    let triple_score = (record.triples.len() as f64 * config.triple_citability_weight).min(10.0);
    let entity_score =
        (record.entities.len() as f64 / config.entities_per_citability_point).min(10.0);
    (triple_score + entity_score) / 2.0
}

fn triple_metrics(record: &SemanticRecord) -> SemanticTripleMetrics {
    SemanticTripleMetrics {
        total: record.triples.len(),
        density: record.triples.len(),
        quality: round2(record.average_confidence()),
        examples: record
            .triples
            .iter()
            .take(TRIPLE_EXAMPLES)
            .cloned()
            .collect(),
    }
}

fn entity_metrics(record: &SemanticRecord) -> EntityMetrics {
    let types: BTreeSet<_> = record.entities.iter().map(|e| e.entity_type).collect();
    EntityMetrics {
        total: record.entities.len(),
        density: record.entities.len(),
        diversity: types.len(),
    }
}

fn semantic_summary(record: &SemanticRecord, used_fallback: bool) -> SemanticSummary {
    let mut entity_types = BTreeMap::new();
    for entity in &record.entities {
        *entity_types
            .entry(entity.entity_type.as_str().to_string())
            .or_insert(0) += 1;
    }

    SemanticSummary {
        relevance: record.relevance,
        coherent: record.coherence.coherent,
        self_contained: record.coherence.self_contained,
        missing_context: record.coherence.missing_context.clone(),
        average_importance: round2(record.average_importance()),
        entity_types,
        used_fallback,
    }
}
