//! Content reader configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Jina reader and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Reader endpoint; the target URL is appended as a path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Search endpoint; the encoded query is appended as a path.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// API key (raises rate limits; optional)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://r.jina.ai".to_string()
}

fn default_search_url() -> String {
    "https://s.jina.ai".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl ReaderConfig {
    /// Base default without env overrides.
    pub fn base_default() -> Self {
        Self {
            base_url: default_base_url(),
            search_url: default_search_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `JINA_API_KEY`: API key
    /// - `GEO_READER_URL`: reader endpoint
    /// - `GEO_SEARCH_URL`: search endpoint
    /// - `GEO_READER_TIMEOUT`: request timeout in seconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("JINA_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("GEO_READER_URL") {
            self.base_url = url;
        }
        if let Ok(url) = std::env::var("GEO_SEARCH_URL") {
            self.search_url = url;
        }
        if let Ok(val) = std::env::var("GEO_READER_TIMEOUT") {
            if let Ok(n) = val.parse() {
                self.timeout_secs = n;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: ReaderConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "https://r.jina.ai");
        assert_eq!(config.search_url, "https://s.jina.ai");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = ReaderConfig::base_default();
        config.api_key = Some("jina_secret".to_string());
        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("jina_secret"));
    }
}
