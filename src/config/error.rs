//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid host address: {0}")]
    InvalidHost(String),

    #[error("Live reply timeout must be between 1 and 60 seconds")]
    InvalidTimeout,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("CORS origin must start with http:// or https://: {0}")]
    InvalidCorsOrigin(String),
}
