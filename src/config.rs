//! Environment-driven settings for the client and the reference server.
//!
//! Both read plain environment variables; the binary loads `.env` through
//! `dotenvy` before calling into here.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const API_BASE_URL_VAR: &str = "API_BASE_URL";
const BIND_ADDR_VAR: &str = "BIND_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {value:?}: must start with http:// or https://")]
    InvalidBaseUrl { value: String },

    #[error("invalid bind address {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string() }
    }
}

impl ClientConfig {
    /// Reads `API_BASE_URL`, falling back to the local default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(API_BASE_URL_VAR) {
            Some(value) if !value.trim().is_empty() => Self::with_base_url(value),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_base_url(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { value });
        }
        Ok(Self { base_url: trimmed.trim_end_matches('/').to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, falling back to `0.0.0.0:8000`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let bind_addr = value
            .trim()
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: value.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { bind_addr })
    }
}
