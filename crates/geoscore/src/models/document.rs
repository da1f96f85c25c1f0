//! Content documents and competitor summaries.

use serde::{Deserialize, Serialize};

use crate::analysis::TextStatistics;

/// A piece of content to analyze, as returned by a reader or supplied by a caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// Document text (Markdown or plain text). Readers deliver it as `content`.
    #[serde(default, alias = "content")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
}

impl ContentDocument {
    pub fn new(title: impl Into<String>, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            body: body.into(),
            description: None,
            published_time: None,
        }
    }
}

/// Lightweight text statistics for a competitor page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorSummary {
    pub url: String,
    pub title: String,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub heading_count: usize,
}

impl From<&ContentDocument> for CompetitorSummary {
    fn from(doc: &ContentDocument) -> Self {
        let stats = TextStatistics::new(&doc.body);
        let word_count = stats.words.len();
        let sentence_count = stats.sentences.len();
        let avg_sentence_length = if sentence_count > 0 {
            word_count as f64 / sentence_count as f64
        } else {
            0.0
        };

        Self {
            url: doc.url.clone(),
            title: doc.title.clone(),
            word_count,
            sentence_count,
            avg_sentence_length,
            heading_count: stats.headings.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_payload_uses_content_key() {
        let json = r#"{"title":"Page","url":"https://example.com","content":"Hello there.","publishedTime":"2024-05-01"}"#;
        let doc: ContentDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.body, "Hello there.");
        assert_eq!(doc.published_time.as_deref(), Some("2024-05-01"));
        assert!(doc.description.is_none());
    }

    #[test]
    fn test_competitor_summary() {
        let doc = ContentDocument::new(
            "Rival",
            "https://rival.example",
            "# Heading\n\nOne two three. Four five six seven.",
        );
        let summary = CompetitorSummary::from(&doc);
        assert_eq!(summary.word_count, 9);
        assert_eq!(summary.sentence_count, 2);
        assert_eq!(summary.avg_sentence_length, 4.5);
        assert_eq!(summary.heading_count, 1);
    }

    #[test]
    fn test_competitor_summary_empty() {
        let doc = ContentDocument::new("Empty", "https://empty.example", "");
        let summary = CompetitorSummary::from(&doc);
        assert_eq!(summary.word_count, 0);
        assert_eq!(summary.avg_sentence_length, 0.0);
    }
}
