//! Service configuration.
//!
//! Configuration is loaded from environment variables once at startup and
//! handed to the router as part of [`crate::routes::AppState`].

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default key directory, relative to the working directory.
pub const DEFAULT_KEY_DIR: &str = "App_Data";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Maximum request timeout in seconds.
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;

/// Default graceful shutdown drain period in seconds.
pub const DEFAULT_DRAIN_SECONDS: u64 = 0;

/// Maximum graceful shutdown drain period in seconds.
pub const MAX_DRAIN_SECONDS: u64 = 300;

/// How the `kid` of an encoded key is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KidStrategy {
    /// Fresh random UUID for every record, so every request yields new ids.
    #[default]
    Random,
    /// RFC 7638 thumbprint of the public key, stable across requests.
    Thumbprint,
}

impl KidStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            KidStrategy::Random => "random",
            KidStrategy::Thumbprint => "thumbprint",
        }
    }
}

impl FromStr for KidStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(KidStrategy::Random),
            "thumbprint" => Ok(KidStrategy::Thumbprint),
            _ => Err(ConfigError::InvalidKidStrategy(format!(
                "JWKS_KID_STRATEGY must be 'random' or 'thumbprint', got '{}'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Directory scanned for `*.pem` files on every request.
    pub key_dir: PathBuf,

    /// `kid` assignment for encoded keys.
    pub kid_strategy: KidStrategy,

    /// Per-request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Drain period after a shutdown signal, in seconds.
    pub drain_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid key directory: {0}")]
    InvalidKeyDir(String),

    #[error("Invalid kid strategy: {0}")]
    InvalidKidStrategy(String),

    #[error("Invalid request timeout configuration: {0}")]
    InvalidRequestTimeout(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainSeconds(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let key_dir = match vars.get("JWKS_KEY_DIR") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidKeyDir(
                    "JWKS_KEY_DIR must not be empty".to_string(),
                ));
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_KEY_DIR),
        };

        let kid_strategy = match vars.get("JWKS_KID_STRATEGY") {
            Some(value) => value.parse()?,
            None => KidStrategy::default(),
        };

        let request_timeout_seconds = parse_bounded_seconds(
            vars,
            "REQUEST_TIMEOUT_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
            1,
            MAX_REQUEST_TIMEOUT_SECONDS,
        )
        .map_err(ConfigError::InvalidRequestTimeout)?;

        let drain_seconds =
            parse_bounded_seconds(vars, "DRAIN_SECONDS", DEFAULT_DRAIN_SECONDS, 0, MAX_DRAIN_SECONDS)
                .map_err(ConfigError::InvalidDrainSeconds)?;

        Ok(Config {
            bind_address,
            key_dir,
            kid_strategy,
            request_timeout_seconds,
            drain_seconds,
        })
    }
}

fn parse_bounded_seconds(
    vars: &HashMap<String, String>,
    name: &str,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, String> {
    let Some(value_str) = vars.get(name) else {
        return Ok(default);
    };

    let value: u64 = value_str.parse().map_err(|e| {
        format!(
            "{} must be a non-negative integer, got '{}': {}",
            name, value_str, e
        )
    })?;

    if !(min..=max).contains(&value) {
        return Err(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        ));
    }

    Ok(value)
}
