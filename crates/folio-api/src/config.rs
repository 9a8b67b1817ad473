//! Client configuration.

use crate::error::ApiError;
use std::time::Duration;

/// Environment variable naming the API base URL.
pub const API_URL_VAR: &str = "FOLIO_API_URL";
/// Environment variable holding the request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "FOLIO_API_TIMEOUT_SECS";

/// Where the API lives and how long to wait for it.
///
/// Override single fields with struct update syntax:
///
/// ```rust,ignore
/// let config = ClientConfig {
///     base_url: "https://cms.example.com".into(),
///     ..ClientConfig::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host, optionally with a path prefix (default:
    /// `http://127.0.0.1:8080`).
    pub base_url: String,
    /// Per-request timeout (default: 10s).
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `FOLIO_API_URL` and `FOLIO_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();
        if let Some(url) = lookup(API_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{TIMEOUT_VAR} must be whole seconds, got {raw:?}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}
