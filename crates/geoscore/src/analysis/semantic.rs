//! Model-assisted semantic extraction.
//!
//! The model reply is untrusted text. It is stripped of fences, cut down
//! to the outermost JSON object and validated field by field; anything
//! that cannot be salvaged turns into a deterministic fallback record.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::text_stats::{term_coverage, SENTENCE_BREAK};
use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::llm::{
    semantic_prompt, ChatMessage, GenerationRequest, TextGenerator, SEMANTIC_SYSTEM_PROMPT,
};
use crate::models::{Coherence, Entity, EntityType, SemanticOutcome, SemanticRecord, SemanticTriple};

/// Note placed in `missingContext` of every fallback record.
pub const FALLBACK_NOTE: &str = "LLM analysis failed - using fallback";

/// Extracts semantic records through a [`TextGenerator`].
#[derive(Clone)]
pub struct SemanticExtractor {
    generator: Arc<dyn TextGenerator>,
    config: ExtractionConfig,
}

impl SemanticExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>, config: ExtractionConfig) -> Self {
        Self { generator, config }
    }

    /// Model used when the caller does not name one.
    pub fn default_model(&self) -> &str {
        self.generator.default_model()
    }

    /// Extract semantics, falling back on any failure. Never errors.
    pub async fn extract(&self, content: &str, query: &str, model: &str) -> SemanticOutcome {
        match self.try_extract(content, query, model).await {
            Ok(record) => SemanticOutcome::Extracted(record),
            Err(e) => {
                warn!("Semantic extraction failed, using fallback: {}", e);
                SemanticOutcome::Fallback {
                    record: fallback_record(content, query),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Extract semantics, reporting why extraction failed.
    pub async fn try_extract(
        &self,
        content: &str,
        query: &str,
        model: &str,
    ) -> Result<SemanticRecord, ExtractionError> {
        let truncated = truncate_content(content, self.config.content_budget);
        let request = GenerationRequest {
            messages: vec![
                ChatMessage::system(SEMANTIC_SYSTEM_PROMPT),
                ChatMessage::user(semantic_prompt(&truncated, query)),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let start = Instant::now();
        let response = self
            .generator
            .run(model, &request)
            .await
            .map_err(|e| ExtractionError::CallFailed(e.to_string()))?;
        debug!(
            "Semantic extraction with {} took {}ms",
            model,
            start.elapsed().as_millis()
        );

        let reply = response
            .response
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| ExtractionError::CallFailed("LLM returned empty response".to_string()))?;
        debug!("Model reply: {} chars", reply.len());

        parse_reply(&reply, &self.config)
    }
}

/// Deterministic record used whenever extraction fails.
pub fn fallback_record(content: &str, query: &str) -> SemanticRecord {
    SemanticRecord {
        triples: Vec::new(),
        entities: Vec::new(),
        coherence: Coherence {
            coherent: true,
            missing_context: vec![FALLBACK_NOTE.to_string()],
            self_contained: true,
        },
        relevance: term_coverage(content, query),
    }
}

/// Cut content to `budget` characters by whole sentences.
fn truncate_content(content: &str, budget: usize) -> String {
    if content.chars().count() <= budget {
        return content.to_string();
    }

    let mut truncated = String::new();
    let mut length = 0;
    for sentence in SENTENCE_BREAK
        .split(content)
        .filter(|s| !s.trim().is_empty())
    {
        let sentence_length = sentence.chars().count();
        if length + sentence_length > budget {
            break;
        }
        truncated.push_str(sentence);
        truncated.push_str(". ");
        length += sentence_length + 2;
    }
    truncated.trim().to_string()
}

/// Parse and validate a raw model reply.
pub fn parse_reply(
    reply: &str,
    config: &ExtractionConfig,
) -> Result<SemanticRecord, ExtractionError> {
    let cleaned = reply
        .trim()
        .replace("```json", "")
        .replace("```", "")
        .replace('`', "");

    let json = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => &cleaned[start..=end],
        _ => {
            return Err(ExtractionError::ParseFailed(
                "No JSON object found in response".to_string(),
            ))
        }
    };

    let parsed: Value =
        serde_json::from_str(json).map_err(|e| ExtractionError::ParseFailed(e.to_string()))?;
    let Some(obj) = parsed.as_object() else {
        return Err(ExtractionError::UnusablePayload);
    };

    let triples = field(obj, "semanticTriples").or_else(|| field(obj, "triples"));
    let entities = field(obj, "entities");
    if triples.is_none() && entities.is_none() {
        return Err(ExtractionError::UnusablePayload);
    }

    Ok(SemanticRecord {
        triples: validate_triples(triples, config),
        entities: validate_entities(entities, config),
        coherence: validate_coherence(obj.get("coherence"), config),
        relevance: unit_number(obj.get("relevance")).unwrap_or(config.default_relevance),
    })
}

/// A present, truthy field.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| is_truthy(v))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a truthy scalar value.
fn text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| is_truthy(v))?;
    Some(match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// A number clamped to [0, 1].
fn unit_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).map(|n| n.clamp(0.0, 1.0))
}

fn validate_triples(value: Option<&Value>, config: &ExtractionConfig) -> Vec<SemanticTriple> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let subject = text(item.get("subject"))?;
            let predicate = text(item.get("predicate"))?;
            let object = text(item.get("object"))?;
            Some(SemanticTriple {
                subject,
                predicate,
                object,
                confidence: unit_number(item.get("confidence"))
                    .unwrap_or(config.default_confidence),
            })
        })
        .take(config.max_triples)
        .collect()
}

fn validate_entities(value: Option<&Value>, config: &ExtractionConfig) -> Vec<Entity> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = text(item.get("text"))?;
            let entity_type = item
                .get("type")
                .and_then(Value::as_str)
                .and_then(EntityType::from_label)?;
            Some(Entity {
                text: name,
                entity_type,
                context: text(item.get("context")).unwrap_or_default(),
                importance: unit_number(item.get("importance"))
                    .unwrap_or(config.default_importance),
            })
        })
        .take(config.max_entities)
        .collect()
}

fn validate_coherence(value: Option<&Value>, config: &ExtractionConfig) -> Coherence {
    let Some(obj) = value.and_then(Value::as_object) else {
        return Coherence::default();
    };

    let missing_context = obj
        .get("missingContext")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(config.max_missing_context)
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Coherence {
        coherent: obj.get("coherent") != Some(&Value::Bool(false)),
        missing_context,
        self_contained: obj.get("selfContained") != Some(&Value::Bool(false)),
    }
}
