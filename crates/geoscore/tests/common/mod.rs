//! In-process stand-ins for the reader and the generative-text backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use geoscore::config::Config;
use geoscore::llm::{GenerationRequest, GenerationResponse, TextGenerator};
use geoscore::models::ContentDocument;
use geoscore::reader::{ContentReader, ReadOptions, SearchOptions};
use geoscore::{GeoAnalyzer, LlmError, ReaderError};

/// What the stub generator does on every call.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Missing,
    Fail(String),
}

pub struct StubGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn text(reply: &str) -> Arc<Self> {
        Self::new(Reply::Text(reply.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn run(
        &self,
        _model: &str,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok(GenerationResponse {
                response: Some(text.clone()),
            }),
            Reply::Missing => Ok(GenerationResponse { response: None }),
            Reply::Fail(msg) => Err(LlmError::Connection(msg.clone())),
        }
    }

    fn default_model(&self) -> &str {
        "stub-model"
    }
}

/// Reader serving fixed pages; unknown URLs answer 404.
#[derive(Default)]
pub struct StubReader {
    pages: HashMap<String, ContentDocument>,
    search_results: Option<Vec<ContentDocument>>,
}

impl StubReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, title: &str, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), ContentDocument::new(title, url, body));
        self
    }

    pub fn search_results(mut self, docs: Vec<ContentDocument>) -> Self {
        self.search_results = Some(docs);
        self
    }
}

#[async_trait]
impl ContentReader for StubReader {
    async fn read(
        &self,
        url: &str,
        _options: &ReadOptions,
    ) -> Result<ContentDocument, ReaderError> {
        self.pages.get(url).cloned().ok_or_else(|| ReaderError::Status {
            status: 404,
            url: url.to_string(),
        })
    }

    async fn search(
        &self,
        query: &str,
        _options: &SearchOptions,
    ) -> Result<Vec<ContentDocument>, ReaderError> {
        self.search_results.clone().ok_or_else(|| ReaderError::Status {
            status: 503,
            url: query.to_string(),
        })
    }
}

pub const GOOD_PAGE: &str = "# Rust Adoption in 2024\n\n## Performance\n\nIn 2024, teams reported 45% fewer crashes after adopting Rust. Build costs fell by $2 million across 12 companies.\n\n## Safety\n\n- Memory bugs dropped by 70 percent last year.\n- Yesterday, 3 vendors announced support.\n\nRust is faster than many managed languages today. Since January, adoption has increased steadily.";

pub const WEAK_PAGE: &str = "Rust is a language. People use it. It is nice.";

pub const SEMANTIC_REPLY: &str = r#"Here you go:
```json
{
  "semanticTriples": [
    {"subject": "Rust", "predicate": "reduces", "object": "crashes", "confidence": 0.9},
    {"subject": "Teams", "predicate": "adopted", "object": "Rust", "confidence": 0.8},
    {"subject": "Vendors", "predicate": "support", "object": "Rust"}
  ],
  "entities": [
    {"text": "Rust", "type": "TECHNOLOGY", "context": "language", "importance": 0.9},
    {"text": "45%", "type": "METRIC", "context": "crash reduction", "importance": 0.7},
    {"text": "Mozilla", "type": "ORGANIZATION", "context": "origin", "importance": 0.4},
    {"text": "Cargo", "type": "PRODUCT", "context": "tooling"}
  ],
  "coherence": {"coherent": true, "missingContext": [], "selfContained": true},
  "relevance": 0.9
}
```"#;

pub fn analyzer(reader: StubReader, generator: Option<Arc<StubGenerator>>) -> GeoAnalyzer {
    let generator = generator.map(|g| g as Arc<dyn TextGenerator>);
    GeoAnalyzer::new(Arc::new(reader), generator, &test_config())
}

/// Configuration without environment influence.
pub fn test_config() -> Config {
    Config {
        llm: geoscore::llm::LlmConfig::base_default(),
        reader: geoscore::reader::ReaderConfig::base_default(),
        ..Config::default()
    }
}
