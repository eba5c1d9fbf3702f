//! Cache configuration loaded from environment variables.

use std::time::Duration;

use posthub_shared::constants::DEFAULT_STALE_SECS;

/// Query cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched result stays fresh before the next read re-fetches.
    /// Env: `POSTHUB_STALE_SECS`
    /// Default: `300` (5 minutes)
    pub stale_after: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(DEFAULT_STALE_SECS),
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("POSTHUB_STALE_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => config.stale_after = Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        value = %val,
                        "Invalid POSTHUB_STALE_SECS, using default"
                    );
                }
            }
        }

        config
    }
}
