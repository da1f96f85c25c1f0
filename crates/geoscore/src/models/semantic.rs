//! Semantic record produced by model-assisted extraction (or its fallback).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub confidence: f64,
}

/// Accepted entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Product,
    Technology,
    Metric,
}

impl EntityType {
    /// Parse an exact, upper-case type label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PERSON" => Some(Self::Person),
            "ORGANIZATION" => Some(Self::Organization),
            "LOCATION" => Some(Self::Location),
            "PRODUCT" => Some(Self::Product),
            "TECHNOLOGY" => Some(Self::Technology),
            "METRIC" => Some(Self::Metric),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::Product => "PRODUCT",
            Self::Technology => "TECHNOLOGY",
            Self::Metric => "METRIC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub text: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub context: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coherence {
    pub coherent: bool,
    pub missing_context: Vec<String>,
    pub self_contained: bool,
}

impl Default for Coherence {
    fn default() -> Self {
        Self {
            coherent: true,
            missing_context: Vec::new(),
            self_contained: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticRecord {
    pub triples: Vec<SemanticTriple>,
    pub entities: Vec<Entity>,
    pub coherence: Coherence,
    pub relevance: f64,
}

impl SemanticRecord {
    /// Mean triple confidence, 0 when there are no triples.
    pub fn average_confidence(&self) -> f64 {
        if self.triples.is_empty() {
            return 0.0;
        }
        self.triples.iter().map(|t| t.confidence).sum::<f64>() / self.triples.len() as f64
    }

    /// Mean entity importance, 0 when there are no entities.
    pub fn average_importance(&self) -> f64 {
        if self.entities.is_empty() {
            return 0.0;
        }
        self.entities.iter().map(|e| e.importance).sum::<f64>() / self.entities.len() as f64
    }
}

/// Result of a semantic extraction attempt.
///
/// Both variants carry a structurally identical record; only the variant
/// tells a caller whether the model output was usable.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticOutcome {
    Extracted(SemanticRecord),
    Fallback {
        record: SemanticRecord,
        reason: String,
    },
}

impl SemanticOutcome {
    pub fn record(&self) -> &SemanticRecord {
        match self {
            SemanticOutcome::Extracted(record) => record,
            SemanticOutcome::Fallback { record, .. } => record,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SemanticOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            SemanticOutcome::Fallback { reason, .. } => Some(reason),
            SemanticOutcome::Extracted(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_labels() {
        assert_eq!(EntityType::from_label("PRODUCT"), Some(EntityType::Product));
        assert_eq!(EntityType::from_label("product"), None);
        assert_eq!(EntityType::from_label("EVENT"), None);
        assert_eq!(EntityType::Metric.as_str(), "METRIC");
        assert_eq!(
            serde_json::to_string(&EntityType::Organization).unwrap(),
            "\"ORGANIZATION\""
        );
    }

    #[test]
    fn test_averages_on_empty_record() {
        let record = SemanticRecord {
            triples: vec![],
            entities: vec![],
            coherence: Coherence::default(),
            relevance: 0.5,
        };
        assert_eq!(record.average_confidence(), 0.0);
        assert_eq!(record.average_importance(), 0.0);
    }
}
