//! Sentence, word, heading and list segmentation.

use std::sync::LazyLock;

use regex::Regex;

pub(crate) static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

pub(crate) static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+.+$").unwrap());

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[*\-+]\s+.+$").unwrap());

/// Segmented view of a body of text.
///
/// Borrowed from the input and recomputed for every analysis.
#[derive(Debug, Clone, Default)]
pub struct TextStatistics<'a> {
    /// Trimmed, non-empty fragments between `.`, `!` and `?` runs.
    pub sentences: Vec<&'a str>,
    /// Whitespace-delimited tokens.
    pub words: Vec<&'a str>,
    /// Markdown heading lines.
    pub headings: Vec<&'a str>,
    /// Bullet list lines (`*`, `-` or `+`).
    pub list_items: Vec<&'a str>,
}

impl<'a> TextStatistics<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            sentences: split_sentences(text),
            words: text.split_whitespace().collect(),
            headings: HEADING.find_iter(text).map(|m| m.as_str()).collect(),
            list_items: LIST_ITEM.find_iter(text).map(|m| m.as_str()).collect(),
        }
    }

    /// Word count of each sentence, in sentence order.
    pub fn sentence_word_counts(&self) -> Vec<usize> {
        self.sentences
            .iter()
            .map(|s| s.split_whitespace().count())
            .collect()
    }

    /// Mean words per sentence, 0 for empty text.
    pub fn average_sentence_length(&self) -> f64 {
        if self.sentences.is_empty() {
            return 0.0;
        }
        let total: usize = self.sentence_word_counts().iter().sum();
        total as f64 / self.sentences.len() as f64
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lower-cased, whitespace-separated query terms.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Share of query terms that occur (as substrings) in the lower-cased content.
///
/// Returns 0 when the query has no terms.
pub fn term_coverage(content: &str, query: &str) -> f64 {
    let terms = query_terms(query);
    if terms.is_empty() {
        return 0.0;
    }
    let haystack = content.to_lowercase();
    let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
    (matched as f64 / terms.len() as f64).min(1.0)
}
