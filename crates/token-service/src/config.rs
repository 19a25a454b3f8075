//! Token service configuration.
//!
//! Configuration is loaded from environment variables. The signing secret
//! is held in a `SecretBox` so it is redacted in Debug output.

use axum::http::HeaderValue;
use common::secret::SecretBox;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default listener address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default graceful shutdown drain period in seconds.
pub const DEFAULT_SHUTDOWN_DRAIN_SECONDS: u64 = 5;

/// Upper bound for the shutdown drain period in seconds.
pub const MAX_SHUTDOWN_DRAIN_SECONDS: u64 = 300;

#[derive(Debug)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// HMAC-SHA256 secret shared with token consumers.
    pub token_secret: SecretBox<Vec<u8>>,

    /// Seconds to keep draining connections after a shutdown signal.
    pub shutdown_drain_seconds: u64,

    /// Browser origin allowed to call `/token`. `None` allows any origin.
    pub cors_allowed_origin: Option<HeaderValue>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid token secret: {0}")]
    InvalidTokenSecret(String),

    #[error("Invalid shutdown drain configuration: {0}")]
    InvalidShutdownDrain(String),

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let secret = vars
            .get("TOKEN_HMAC_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("TOKEN_HMAC_SECRET".to_string()))?;

        if secret.is_empty() {
            return Err(ConfigError::InvalidTokenSecret(
                "TOKEN_HMAC_SECRET must not be empty".to_string(),
            ));
        }

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let shutdown_drain_seconds = if let Some(value_str) = vars.get("SHUTDOWN_DRAIN_SECONDS") {
            let value: u64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidShutdownDrain(format!(
                    "SHUTDOWN_DRAIN_SECONDS must be a valid non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value > MAX_SHUTDOWN_DRAIN_SECONDS {
                return Err(ConfigError::InvalidShutdownDrain(format!(
                    "SHUTDOWN_DRAIN_SECONDS must not exceed {} seconds, got {}",
                    MAX_SHUTDOWN_DRAIN_SECONDS, value
                )));
            }

            value
        } else {
            DEFAULT_SHUTDOWN_DRAIN_SECONDS
        };

        let cors_allowed_origin = match vars.get("CORS_ALLOWED_ORIGIN") {
            Some(origin) if !origin.is_empty() && origin.as_str() != "*" => {
                Some(HeaderValue::from_str(origin).map_err(|e| {
                    ConfigError::InvalidCorsOrigin(format!(
                        "CORS_ALLOWED_ORIGIN must be a valid header value: {}",
                        e
                    ))
                })?)
            }
            _ => None,
        };

        Ok(Config {
            bind_address,
            token_secret: SecretBox::new(Box::new(secret.as_bytes().to_vec())),
            shutdown_drain_seconds,
            cors_allowed_origin,
        })
    }
}
