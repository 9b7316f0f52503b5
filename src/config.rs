//! Client configuration.
//!
//! The API base URL comes from environment-style configuration so the same
//! build runs against development and production backends. A `.env` file is
//! honored when present.

use anyhow::{Context, Result};

/// Environment variable naming the API base URL,
/// e.g. `http://192.168.0.37:8080`.
const API_BASE_URL_VAR: &str = "API_BASE_URL";

/// HTTP request timeout in seconds, shared by every outbound client.
/// 30s allows for slow API responses while failing fast enough for good UX.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    /// Load configuration from the environment, reading `.env` if present
    /// (silently ignored when missing).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let api_base_url = std::env::var(API_BASE_URL_VAR)
            .with_context(|| format!("{API_BASE_URL_VAR} is not set"))?;
        Ok(Self::new(api_base_url))
    }
}
