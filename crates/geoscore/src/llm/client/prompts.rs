//! Prompts for semantic extraction.

/// System message sent with every extraction request.
pub const SEMANTIC_SYSTEM_PROMPT: &str =
    "You are a semantic analysis expert. Return only valid JSON, no markdown formatting or additional text.";

const SEMANTIC_PROMPT: &str = r#"You are a semantic analysis expert for AI search optimization.

Analyze this content for the query: "{query}"

Content:
{content}

CRITICAL: You MUST return ONLY a valid JSON object with this EXACT structure:

{
  "semanticTriples": [
    {"subject": "string", "predicate": "string", "object": "string", "confidence": 0.9}
  ],
  "entities": [
    {"text": "string", "type": "PERSON|ORGANIZATION|LOCATION|PRODUCT|TECHNOLOGY|METRIC", "context": "string", "importance": 0.8}
  ],
  "coherence": {
    "coherent": true,
    "missingContext": ["list of missing context"],
    "selfContained": true
  },
  "relevance": 0.85
}

Rules:
1. Extract 3-5 factual semantic triples (subject-predicate-object) related to "{query}"
2. Identify 5-10 key entities with importance scores (0-1)
3. Assess if content makes sense without external context
4. Rate topical relevance to query (0-1)
5. Return ONLY the JSON object above - NO other text, NO markdown, NO explanations

Begin your response with { and end with }"#;

/// Build the user prompt for one extraction request.
pub fn semantic_prompt(content: &str, query: &str) -> String {
    SEMANTIC_PROMPT
        .replace("{query}", query)
        .replace("{content}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_prompt() {
        let prompt = semantic_prompt("Rust is fast.", "rust speed");
        assert!(prompt.contains("Analyze this content for the query: \"rust speed\""));
        assert!(prompt.contains("Content:\nRust is fast."));
        assert!(prompt.contains("related to \"rust speed\""));
        assert!(!prompt.contains("{query}"));
        assert!(prompt.ends_with("end with }"));
    }
}
