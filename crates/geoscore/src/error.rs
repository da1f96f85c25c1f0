//! Error types for the scoring engine.

use thiserror::Error;

use crate::models::DocumentFailure;

/// Errors surfaced to callers of the analysis service.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Failed to read content: {0}")]
    Read(#[from] ReaderError),
    #[error("{0}")]
    Validation(String),
    #[error("Content exceeds maximum size of {limit} characters ({actual} provided)")]
    PayloadTooLarge { limit: usize, actual: usize },
    #[error("{0}")]
    ComparisonInput(String),
    #[error(
        "Not enough successful analyses (minimum {required} required): {}",
        join_failures(failures)
    )]
    InsufficientAnalyses {
        required: usize,
        failures: Vec<DocumentFailure>,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeoError {
    /// HTTP-style status used at the outer boundaries.
    pub fn status_code(&self) -> u16 {
        match self {
            GeoError::Validation(_) => 400,
            GeoError::PayloadTooLarge { .. } => 413,
            GeoError::ComparisonInput(_) => 422,
            GeoError::Read(_) | GeoError::InsufficientAnalyses { .. } => 502,
            GeoError::Config(_) => 500,
        }
    }

    /// Per-document causes, for errors that carry them.
    pub fn failures(&self) -> &[DocumentFailure] {
        match self {
            GeoError::InsufficientAnalyses { failures, .. } => failures,
            _ => &[],
        }
    }
}

fn join_failures(failures: &[DocumentFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures of a single semantic extraction attempt.
///
/// These never leave the analysis service; each one is turned into the
/// deterministic fallback record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("LLM call failed: {0}")]
    CallFailed(String),
    #[error("Failed to parse LLM response: {0}")]
    ParseFailed(String),
    #[error("LLM response has neither triples nor entities")]
    UnusablePayload,
}

/// Errors from the generative-text client.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("LLM is disabled")]
    Disabled,
}

/// Errors from the content-reader client.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Reader returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to decode reader response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GeoError::Validation("x".into()).status_code(), 400);
        assert_eq!(
            GeoError::PayloadTooLarge {
                limit: 10,
                actual: 11
            }
            .status_code(),
            413
        );
        assert_eq!(GeoError::ComparisonInput("x".into()).status_code(), 422);
        assert_eq!(
            GeoError::Read(ReaderError::Status {
                status: 404,
                url: "https://example.com".into()
            })
            .status_code(),
            502
        );
        assert_eq!(GeoError::Config("x".into()).status_code(), 500);
    }

    #[test]
    fn test_insufficient_message() {
        let err = GeoError::InsufficientAnalyses {
            required: 2,
            failures: vec![
                DocumentFailure {
                    url: "https://a.example".into(),
                    error: "boom".into(),
                },
                DocumentFailure {
                    url: "https://b.example".into(),
                    error: "timeout".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Not enough successful analyses (minimum 2 required): \
             https://a.example: boom; https://b.example: timeout"
        );
        assert_eq!(err.failures().len(), 2);
    }
}
