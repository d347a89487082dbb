//! HTTP listener, logging and CORS settings

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

/// Where the server is deployed. Production tightens the defaults.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON log lines; unset means JSON in production, pretty text elsewhere
    pub log_json: Option<bool>,

    /// Comma-separated browser origins allowed to call the API.
    /// Unset allows any origin, which production refuses.
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Whether logs go out as JSON lines.
    pub fn json_logs(&self) -> bool {
        self.log_json.unwrap_or_else(|| self.is_production())
    }

    /// Configured origins with blanks dropped; empty means any origin.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;

        let origins = self.cors_origins_list();
        if let Some(bad) = origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ValidationError::InvalidCorsOrigin(bad.clone()));
        }
        if origins.is_empty() && self.is_production() {
            return Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            log_json: None,
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,reflection_coach=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> ServerConfig {
        ServerConfig {
            environment: Environment::Production,
            cors_origins: Some("https://coach.example.edu".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_bind_all_interfaces_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_reported() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.socket_addr(), Err(ValidationError::InvalidHost(_))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn production_logs_json_unless_overridden() {
        let mut config = production();
        assert!(config.json_logs());

        config.log_json = Some(false);
        assert!(!config.json_logs());

        let dev = ServerConfig {
            log_json: Some(true),
            ..Default::default()
        };
        assert!(dev.json_logs());
    }

    #[test]
    fn production_requires_explicit_origins() {
        assert!(production().validate().is_ok());

        let open = ServerConfig {
            cors_origins: Some(" , ".to_string()),
            ..production()
        };
        assert!(matches!(
            open.validate(),
            Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"))
        ));
    }

    #[test]
    fn origins_are_split_trimmed_and_checked() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173, https://coach.example.edu,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "https://coach.example.edu"]
        );

        let config = ServerConfig {
            cors_origins: Some("localhost:5173".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCorsOrigin(origin)) if origin == "localhost:5173"
        ));
    }
}
