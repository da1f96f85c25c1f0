//! Jina reader and search client.
//!
//! `r.jina.ai/{url}` renders a page to Markdown or JSON; `s.jina.ai/{query}`
//! runs a web search and returns the rendered top results.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{ContentReader, ReadOptions, ReaderConfig, ReturnFormat, SearchOptions};
use crate::error::ReaderError;
use crate::models::ContentDocument;

/// JSON envelope around every reader payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Reader backed by the Jina HTTP APIs.
pub struct JinaReader {
    config: ReaderConfig,
    client: Client,
}

impl JinaReader {
    pub fn new(config: ReaderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn read_url(&self, url: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), url)
    }

    fn search_url(&self, query: &str, sites: &[String]) -> String {
        let mut url = format!(
            "{}/{}",
            self.config.search_url.trim_end_matches('/'),
            urlencoding::encode(query)
        );
        if !sites.is_empty() {
            let params: Vec<String> = sites.iter().map(|s| format!("site={}", s)).collect();
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    /// Headers for a read request, in the order they are sent.
    fn read_headers(&self, options: &ReadOptions) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", accept(options.return_format).to_string())];
        if let Some(ref key) = self.config.api_key {
            headers.push(("Authorization", format!("Bearer {}", key)));
        }
        if options.with_image_captions {
            headers.push(("X-With-Generated-Alt", "true".to_string()));
        }
        if options.with_links_summary {
            headers.push(("X-With-Links-Summary", "true".to_string()));
        }
        if options.with_images_summary {
            headers.push(("X-With-Images-Summary", "true".to_string()));
        }
        if let Some(ref selector) = options.target_selector {
            headers.push(("X-Target-Selector", selector.clone()));
        }
        if let Some(timeout) = options.timeout {
            headers.push(("X-Timeout", timeout.to_string()));
        }
        if options.use_reader_lm {
            headers.push(("X-Use-Readerlm-V2", "true".to_string()));
        }
        headers
    }

    fn search_headers(&self, options: &SearchOptions) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", accept(options.return_format).to_string())];
        if let Some(ref key) = self.config.api_key {
            headers.push(("Authorization", format!("Bearer {}", key)));
        }
        headers
    }

    async fn fetch(
        &self,
        url: &str,
        headers: Vec<(&'static str, String)>,
    ) -> Result<reqwest::Response, ReaderError> {
        let mut req: RequestBuilder = self.client.get(url);
        for (name, value) in headers {
            req = req.header(name, value);
        }

        let start = Instant::now();
        let resp = req.send().await?;
        debug!(
            "GET {} -> {} in {}ms",
            url,
            resp.status(),
            start.elapsed().as_millis()
        );

        if !resp.status().is_success() {
            return Err(ReaderError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }
}

fn accept(format: ReturnFormat) -> &'static str {
    match format {
        ReturnFormat::Json => "application/json",
        ReturnFormat::Markdown => "text/plain",
    }
}

async fn unwrap_data<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ReaderError> {
    let body = resp.text().await?;
    parse_envelope(&body)
}

fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ReaderError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|e| e.data)
        .map_err(|e| ReaderError::Decode(e.to_string()))
}

#[async_trait]
impl ContentReader for JinaReader {
    async fn read(&self, url: &str, options: &ReadOptions) -> Result<ContentDocument, ReaderError> {
        let endpoint = self.read_url(url);
        let resp = self.fetch(&endpoint, self.read_headers(options)).await?;

        match options.return_format {
            ReturnFormat::Json => {
                let mut doc: ContentDocument = unwrap_data(resp).await?;
                if doc.url.is_empty() {
                    doc.url = url.to_string();
                }
                Ok(doc)
            }
            ReturnFormat::Markdown => {
                let text = resp.text().await?;
                Ok(ContentDocument::new("", url, text))
            }
        }
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<ContentDocument>, ReaderError> {
        let endpoint = self.search_url(query, &options.sites);
        let resp = self.fetch(&endpoint, self.search_headers(options)).await?;

        match options.return_format {
            ReturnFormat::Json => unwrap_data(resp).await,
            ReturnFormat::Markdown => {
                let text = resp.text().await?;
                Ok(vec![ContentDocument::new(query, query, text)])
            }
        }
    }
}
