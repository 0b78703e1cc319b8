//! Runtime server configuration
//!
//! ServerConfig is rebuilt from environment variables on every launch and is
//! immutable for the lifetime of the process.
//!
//! # Environment Variables
//!
//! - `CONTENT_SERVER_HOST`: Bind address (default: 127.0.0.1)
//! - `CONTENT_SERVER_PORT`: Server port (default: 8080)
//! - `CORS_ALLOW_ORIGIN`: Comma-separated allowed origins
//! - `CONTENT_SEARCH_DEFAULT_TAG`: Tag used when a search omits `tag`
//!   (default: `tag`; set to an empty string to match every tag)
//! - `CONTENT_RETAIN_REPLACED_CHILDREN`: Keep replaced descendants fetchable
//!   after an update (`true`/`1`; default: purge them)

use axum::http::HeaderValue;
use contentspace_core::{ReplacedChildren, StoreConfig};
use thiserror::Error;

/// Search tag applied when the `tag` query parameter is omitted
pub const DEFAULT_SEARCH_TAG: &str = "tag";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,

    /// Tag used when a search request omits `tag` (`None` matches all)
    pub search_default_tag: Option<String>,

    /// Tree store behaviour
    pub store: StoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            search_default_tag: Some(DEFAULT_SEARCH_TAG.to_string()),
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("CONTENT_SERVER_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("CONTENT_SERVER_PORT") {
            config.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("CONTENT_SERVER_PORT", port.clone(), e.to_string()))?;
        }

        if let Some(origins) = lookup("CORS_ALLOW_ORIGIN") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(tag) = lookup("CONTENT_SEARCH_DEFAULT_TAG") {
            config.search_default_tag = Some(tag).filter(|t| !t.trim().is_empty());
        }

        if let Some(retain) = lookup("CONTENT_RETAIN_REPLACED_CHILDREN") {
            config.store.replaced_children = match retain.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => ReplacedChildren::Retain,
                "false" | "0" | "no" => ReplacedChildren::Purge,
                _ => {
                    return Err(ConfigError::invalid(
                        "CONTENT_RETAIN_REPLACED_CHILDREN",
                        retain,
                        "expected true or false",
                    ))
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid(
                "CONTENT_SERVER_HOST",
                self.host.clone(),
                "host cannot be empty",
            ));
        }

        for origin in &self.cors_origins {
            origin.parse::<HeaderValue>().map_err(|_| {
                ConfigError::invalid("CORS_ALLOW_ORIGIN", origin.clone(), "not a valid HTTP origin")
            })?;
        }

        Ok(())
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
