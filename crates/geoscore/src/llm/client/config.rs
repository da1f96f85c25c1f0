//! LLM client configuration.

use serde::{Deserialize, Serialize};

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LlmProvider {
    /// Ollama API (local, default)
    #[default]
    Ollama,
    /// OpenAI-compatible API (OpenAI, Groq, Together.ai, etc.)
    #[serde(rename = "openai")]
    OpenAI,
    /// Cloudflare Workers AI REST API
    WorkersAi,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Some(Self::Ollama),
            "openai" | "groq" | "together" => Some(Self::OpenAI),
            "workers-ai" | "workersai" | "cloudflare" => Some(Self::WorkersAi),
            _ => None,
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Ollama => "http://localhost:11434",
            Self::OpenAI => "https://api.openai.com",
            Self::WorkersAi => "https://api.cloudflare.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Ollama => "llama3.1:8b",
            Self::OpenAI => "gpt-4o-mini",
            Self::WorkersAi => "@cf/meta/llama-3.3-70b-instruct-fp8-fast",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAI => "openai",
            Self::WorkersAi => "workers-ai",
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether semantic extraction is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// LLM provider (ollama, openai or workers-ai)
    #[serde(default)]
    pub provider: LlmProvider,
    /// API endpoint (provider-specific defaults apply)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Model used when a request does not name one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// API key for hosted providers
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Cloudflare account id (Workers AI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl LlmConfig {
    /// Base default without env overrides.
    pub fn base_default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            endpoint: None,
            model: None,
            api_key: None,
            account_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `GEO_LLM_ENABLED`: "true" or "false"
    /// - `GEO_LLM_PROVIDER`: "ollama" (default), "openai", "groq", "together" or "workers-ai"
    /// - `GEO_LLM_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `GEO_LLM_API_KEY`: API key for hosted providers
    /// - `GEO_LLM_MODEL`: Model name
    /// - `GEO_LLM_ACCOUNT_ID` / `CLOUDFLARE_ACCOUNT_ID`: Workers AI account
    /// - `GEO_LLM_TIMEOUT`: Request timeout in seconds
    ///
    /// Without `GEO_LLM_PROVIDER` the provider is detected from
    /// `CLOUDFLARE_API_TOKEN`, `GROQ_API_KEY` or `OPENAI_API_KEY`, in that order.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("GEO_LLM_ENABLED") {
            self.enabled = val.eq_ignore_ascii_case("true") || val == "1";
        }

        let explicit_provider = std::env::var("GEO_LLM_PROVIDER").ok();
        if let Some(provider) = explicit_provider.as_deref().and_then(LlmProvider::from_str) {
            self.provider = provider;
        }

        if let Ok(endpoint) = std::env::var("GEO_LLM_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Ok(key) = std::env::var("GEO_LLM_API_KEY") {
            self.api_key = Some(key);
        }

        if let Some(provider_str) = explicit_provider {
            if self.endpoint.is_none() && provider_str.eq_ignore_ascii_case("groq") {
                self.endpoint = Some("https://api.groq.com/openai".to_string());
            }
            if self.endpoint.is_none() && provider_str.eq_ignore_ascii_case("together") {
                self.endpoint = Some("https://api.together.xyz".to_string());
            }
            if self.api_key.is_none() {
                self.api_key = match provider_str.to_lowercase().as_str() {
                    "groq" => std::env::var("GROQ_API_KEY").ok(),
                    "openai" => std::env::var("OPENAI_API_KEY").ok(),
                    "workers-ai" | "workersai" | "cloudflare" => {
                        std::env::var("CLOUDFLARE_API_TOKEN").ok()
                    }
                    _ => None,
                };
            }
        } else if self.api_key.is_none() {
            if let Ok(key) = std::env::var("CLOUDFLARE_API_TOKEN") {
                self.api_key = Some(key);
                self.provider = LlmProvider::WorkersAi;
            } else if let Ok(key) = std::env::var("GROQ_API_KEY") {
                self.api_key = Some(key);
                self.provider = LlmProvider::OpenAI;
                if self.endpoint.is_none() {
                    self.endpoint = Some("https://api.groq.com/openai".to_string());
                }
            } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.api_key = Some(key);
                self.provider = LlmProvider::OpenAI;
            }
        }

        if let Ok(val) = std::env::var("GEO_LLM_MODEL") {
            self.model = Some(val);
        }
        if let Ok(val) =
            std::env::var("GEO_LLM_ACCOUNT_ID").or_else(|_| std::env::var("CLOUDFLARE_ACCOUNT_ID"))
        {
            self.account_id = Some(val);
        }
        if let Ok(val) = std::env::var("GEO_LLM_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }
        self
    }

    /// Endpoint to use, falling back to the provider default.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
    }

    /// Model to use, falling back to the provider default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }
}
