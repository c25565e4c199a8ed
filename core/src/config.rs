//! Client configuration: base URL and request timeout.
//!
//! # Design
//! The base URL is resolved once — from an explicit string or from the
//! `METROLOGY_API_BASE` environment variable at startup — and carried as a
//! validated [`Url`] inside an explicit `Config` value. Nothing reads the
//! environment per call, so tests can inject any base URL they like.

use std::time::Duration;

use url::Url;

/// Environment variable holding the registry base URL.
pub const BASE_URL_ENV: &str = "METROLOGY_API_BASE";

/// Base URL used when `METROLOGY_API_BASE` is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Wait bound applied to every request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters for [`EquipmentClient`](crate::EquipmentClient).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Config {
    /// Build a config from an explicit base URL.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Build a config from `METROLOGY_API_BASE`, falling back to
    /// [`DEFAULT_BASE_URL`] when the variable is unset or blank.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let base = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(&base)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
