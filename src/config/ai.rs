//! Live reply provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest live-call budget accepted, in seconds.
const MAX_TIMEOUT_SECS: u64 = 60;

/// Live reply provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; absent means the engine runs fallback-only
    pub openai_api_key: Option<Secret<String>>,

    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hard budget for one live call in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Whether live replies are attempted when a request does not say
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if one is set and non-blank
    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.trim().is_empty())
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key().is_some()
    }

    /// Validate live provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            enabled: default_enabled(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_enabled() -> bool {
    true
}
