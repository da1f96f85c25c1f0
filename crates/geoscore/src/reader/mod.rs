//! Content reader: turns URLs and search queries into documents.

mod config;
mod jina;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::error::ReaderError;
use crate::models::ContentDocument;

pub use config::ReaderConfig;
pub use jina::JinaReader;

/// Response format requested from the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    Json,
    #[default]
    Markdown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    pub with_image_captions: bool,
    pub with_links_summary: bool,
    pub with_images_summary: bool,
    pub target_selector: Option<String>,
    /// Server-side render timeout in seconds.
    pub timeout: Option<u64>,
    pub use_reader_lm: bool,
    pub return_format: ReturnFormat,
}

impl ReadOptions {
    /// Options used for documents that are about to be scored.
    pub fn for_analysis() -> Self {
        Self {
            with_image_captions: true,
            with_links_summary: true,
            use_reader_lm: true,
            return_format: ReturnFormat::Json,
            ..Self::default()
        }
    }

    /// Plain JSON read, used for competitor pages.
    pub fn json() -> Self {
        Self {
            return_format: ReturnFormat::Json,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Restrict results to these sites.
    pub sites: Vec<String>,
    pub return_format: ReturnFormat,
}

/// Source of content documents.
#[async_trait]
pub trait ContentReader: Send + Sync {
    /// Read a single URL.
    async fn read(&self, url: &str, options: &ReadOptions) -> Result<ContentDocument, ReaderError>;

    /// Search the web for documents matching `query`.
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<ContentDocument>, ReaderError>;

    /// Read many URLs concurrently, one result per URL in input order.
    async fn read_batch(
        &self,
        urls: &[String],
        options: &ReadOptions,
    ) -> Vec<Result<ContentDocument, ReaderError>> {
        join_all(urls.iter().map(|url| self.read(url, options))).await
    }
}
