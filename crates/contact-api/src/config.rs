//! Service configuration
//!
//! Loaded from an optional TOML file, then overridden by CLI flags and
//! environment variables (see [`crate::cli::ConfigArgs`]).
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3000
//! cors_allow_origin = "https://example.dev"
//!
//! [store]
//! backend = "mongodb"
//! uri = "mongodb://localhost:27017/portfolio"
//! collection = "contacts"
//! ```

use axum::http::HeaderValue;
use contact_storage::{StoreBackend, StoreConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Origin allowed to POST cross-site; CORS is off when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors_allow_origin: Option<String>,
    /// JSON log lines instead of human-readable text
    #[serde(default = "default_true")]
    pub log_json: bool,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_size() -> usize {
    64 * 1024 // 64KB
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_size: default_max_body_size(),
            cors_allow_origin: None,
            log_json: true,
            store: StoreConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from a TOML file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_size == 0 {
            return Err(ConfigError::Invalid(
                "max_body_size must be greater than zero".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::Mongodb && self.store.mongo.uri.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.uri is required for the mongodb backend".to_string(),
            ));
        }

        if self.store.mongo.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "store.collection must not be empty".to_string(),
            ));
        }

        self.cors_origin()?;
        self.socket_addr()?;
        Ok(())
    }

    /// Address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("invalid listen address: {}", e)))
    }

    /// Parsed CORS origin, if one is configured
    pub fn cors_origin(&self) -> Result<Option<HeaderValue>, ConfigError> {
        self.cors_allow_origin
            .as_deref()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    ConfigError::Invalid(format!("invalid cors_allow_origin '{}': {}", origin, e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_body_size, 64 * 1024);
        assert!(config.log_json);
        assert_eq!(config.store.backend, StoreBackend::Mongodb);
        assert_eq!(config.store.mongo.collection, "contacts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml(
            r#"
            port = 8080

            [store]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.mongo.collection, "contacts");
    }

    #[test]
    fn test_store_settings_from_toml() {
        let config = ServiceConfig::from_toml(
            r#"
            [store]
            uri = "mongodb://db:27017/portfolio"
            database = "portfolio"
            server_selection_timeout_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.store.mongo.uri, "mongodb://db:27017/portfolio");
        assert_eq!(config.store.mongo.database.as_deref(), Some("portfolio"));
        assert_eq!(config.store.mongo.server_selection_timeout_ms, Some(5000));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ServiceConfig::from_toml("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let config = ServiceConfig {
            max_body_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_requires_mongo_uri() {
        let mut config = ServiceConfig::default();
        config.store.mongo.uri = "  ".to_string();
        assert!(config.validate().is_err());

        config.store.backend = StoreBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_listen_address() {
        let config = ServiceConfig {
            host: "not an ip".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_origin() {
        let config = ServiceConfig {
            cors_allow_origin: Some("https://example.dev".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origin().unwrap(),
            Some(HeaderValue::from_static("https://example.dev"))
        );

        let config = ServiceConfig {
            cors_allow_origin: Some("bad\norigin".to_string()),
            ..Default::default()
        };
        assert!(config.cors_origin().is_err());
    }
}
