//! Session configuration.
//!
//! - **Base URL**: where the catalog services live (`CATALOG_CASCADE_BASE_URL`)
//! - **Request timeout**: per-request transport bound (`CATALOG_CASCADE_TIMEOUT_SECS`,
//!   `0` disables it so a hung fetch simply never completes)
//! - **Retries**: transient failure budget (`CATALOG_CASCADE_MAX_RETRIES`)

use std::time::Duration;

use crate::catalog::{CatalogApiError, HttpCatalogClient, RetryConfig};

/// Default backend address.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default per-request timeout (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default capacity of the session's message channel.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for a filter session and its catalog client.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the catalog services, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout. `None` means no timeout.
    ///
    /// Default: 30 seconds. Configure via `CATALOG_CASCADE_TIMEOUT_SECS`.
    pub request_timeout: Option<Duration>,

    /// Backoff for transient failures.
    ///
    /// Default: [`RetryConfig::DEFAULT`]. The retry count is configurable via
    /// `CATALOG_CASCADE_MAX_RETRIES`.
    pub retry: RetryConfig,

    /// Whether to fetch the category list at startup.
    pub load_categories: bool,

    /// Capacity of the channel feeding user events to the session.
    pub channel_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    /// Creates a `SessionConfig` with default values.
    pub fn new() -> Self {
        SessionConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            retry: RetryConfig::DEFAULT,
            load_categories: true,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Creates a `SessionConfig` from environment variables.
    ///
    /// Unset or unparseable variables fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::new();

        let base_url = lookup("CATALOG_CASCADE_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let request_timeout = match lookup("CATALOG_CASCADE_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.request_timeout,
        };

        let retry = lookup("CATALOG_CASCADE_MAX_RETRIES")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|n| defaults.retry.with_max_retries(n))
            .unwrap_or(defaults.retry);

        SessionConfig {
            base_url,
            request_timeout,
            retry,
            ..defaults
        }
    }

    /// Builds the HTTP client described by this config.
    pub fn catalog_client(&self) -> Result<HttpCatalogClient, CatalogApiError> {
        HttpCatalogClient::new(self.base_url.clone(), self.request_timeout)
    }
}
