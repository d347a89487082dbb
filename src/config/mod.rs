//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REFLECTION_COACH` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a fallback-only server.
//!
//! # Example
//!
//! ```no_run
//! use reflection_coach::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod dialogue;
mod error;
mod server;

pub use ai::AiConfig;
pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use secrecy::Secret;
use serde::Deserialize;

/// Unprefixed key honoured when `REFLECTION_COACH__AI__OPENAI_API_KEY` is unset.
const BARE_OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Live reply provider configuration (OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Scripted dialogue configuration
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REFLECTION_COACH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to a bare `OPENAI_API_KEY` for the live provider key
    ///
    /// # Environment Variable Format
    ///
    /// - `REFLECTION_COACH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REFLECTION_COACH__AI__TIMEOUT_SECS=5` -> `ai.timeout_secs = 5`
    /// - `REFLECTION_COACH__DIALOGUE__AMBIGUOUS_MOTIVATION=fear`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REFLECTION_COACH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if !config.ai.has_openai() {
            config.ai.openai_api_key = std::env::var(BARE_OPENAI_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(Secret::new);
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}
