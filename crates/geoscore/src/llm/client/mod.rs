//! LLM client for semantic extraction.
//!
//! Supports Ollama, OpenAI-compatible chat completions and the Workers AI
//! REST API behind the [`TextGenerator`] trait.

mod config;
mod prompts;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;

pub use config::{LlmConfig, LlmProvider};
pub use prompts::{semantic_prompt, SEMANTIC_SYSTEM_PROMPT};

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A generation request: messages plus sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Raw model output. `None` when the backend produced no text field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationResponse {
    pub response: Option<String>,
}

/// A generative-text capability.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run `model` on the request and return its textual reply.
    async fn run(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError>;

    /// Model used when the caller does not pick one.
    fn default_model(&self) -> &str;
}

/// LLM client backed by an HTTP API.
pub struct LlmClient {
    config: LlmConfig,
    client: Client,
}

/// Ollama chat request format.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: Option<ChatMessage>,
}

/// OpenAI chat completion request format.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

/// Workers AI request format.
#[derive(Debug, Serialize)]
struct WorkersAiRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct WorkersAiResponse {
    result: Option<WorkersAiResult>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WorkersAiResult {
    #[serde(default)]
    response: serde_json::Value,
}

impl LlmClient {
    /// Create a new LLM client with the given configuration.
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn call_ollama(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, LlmError> {
        let body = OllamaRequest {
            model,
            messages: &request.messages,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };
        let url = format!("{}/api/chat", self.config.endpoint());
        let resp: OllamaResponse = self.post_json(&url, &body).await?;
        Ok(resp.message.map(|m| m.content))
    }

    async fn call_openai(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, LlmError> {
        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let url = format!("{}/v1/chat/completions", self.config.endpoint());
        let resp: ChatCompletionResponse = self.post_json(&url, &body).await?;
        Ok(resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }

    async fn call_workers_ai(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<Option<String>, LlmError> {
        let account_id = self
            .config
            .account_id
            .as_deref()
            .ok_or_else(|| LlmError::Api("Workers AI requires an account id".to_string()))?;

        let body = WorkersAiRequest {
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        let url = format!(
            "{}/client/v4/accounts/{}/ai/run/{}",
            self.config.endpoint(),
            account_id,
            model
        );
        let resp: WorkersAiResponse = self.post_json(&url, &body).await?;
        if resp.result.is_none() && !resp.errors.is_empty() {
            return Err(LlmError::Api(format!("Workers AI errors: {:?}", resp.errors)));
        }
        Ok(resp.result.and_then(|r| response_text(r.response)))
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut req = self.client.post(url).json(body);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {}: {}", status, body)));
        }

        resp.json().await.map_err(|e| LlmError::Parse(e.to_string()))
    }
}

/// Normalise a backend `response` field to text.
///
/// Strings pass through; null becomes `None`; any other JSON value is
/// re-serialised so the caller can still try to parse it.
fn response_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn run(
        &self,
        model: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }

        let start = Instant::now();
        let response = match self.config.provider {
            LlmProvider::Ollama => self.call_ollama(model, request).await?,
            LlmProvider::OpenAI => self.call_openai(model, request).await?,
            LlmProvider::WorkersAi => self.call_workers_ai(model, request).await?,
        };
        debug!(
            "LLM call to {} ({}) finished in {}ms",
            model,
            self.config.provider.as_str(),
            start.elapsed().as_millis()
        );

        Ok(GenerationResponse { response })
    }

    fn default_model(&self) -> &str {
        self.config.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text() {
        assert_eq!(response_text(serde_json::Value::Null), None);
        assert_eq!(
            response_text(serde_json::json!("{\"a\":1}")),
            Some("{\"a\":1}".to_string())
        );
        assert_eq!(
            response_text(serde_json::json!({"entities": []})),
            Some("{\"entities\":[]}".to_string())
        );
    }

    #[test]
    fn test_workers_ai_payload() {
        let json = r#"{"result":{"response":"hello"},"success":true,"errors":[]}"#;
        let resp: WorkersAiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.result.and_then(|r| response_text(r.response)),
            Some("hello".to_string())
        );

        let json = r#"{"result":{},"success":true}"#;
        let resp: WorkersAiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result.and_then(|r| response_text(r.response)), None);
    }

    #[test]
    fn test_chat_completion_payload() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"{}"}}]}"#;
        let resp: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_disabled_client() {
        let mut config = LlmConfig::base_default();
        config.enabled = false;
        let client = LlmClient::new(config);
        let request = GenerationRequest {
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 10,
            temperature: 0.1,
        };
        let err = client.run("any", &request).await.unwrap_err();
        assert!(matches!(err, LlmError::Disabled));
    }

    #[test]
    fn test_default_model_follows_config() {
        let client = LlmClient::new(LlmConfig::base_default().with_model("qwen2.5:7b"));
        assert_eq!(client.default_model(), "qwen2.5:7b");
    }
}
