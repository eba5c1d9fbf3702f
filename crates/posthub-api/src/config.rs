//! Client configuration loaded from environment variables.
//!
//! All settings default to the public demo resource so the application runs
//! with zero configuration.

use std::time::Duration;

use posthub_shared::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};

/// Remote resource client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the posts resource.
    /// Env: `POSTHUB_API_BASE_URL`
    /// Default: `https://jsonplaceholder.typicode.com`
    pub base_url: String,

    /// Per-request timeout.
    /// Env: `POSTHUB_HTTP_TIMEOUT_SECS`
    /// Default: `30`
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("POSTHUB_API_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(val) = std::env::var("POSTHUB_HTTP_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid POSTHUB_HTTP_TIMEOUT_SECS, using default"
                    );
                }
            }
        }

        config
    }
}
