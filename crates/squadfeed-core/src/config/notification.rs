//! Notification cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Notification cache and banner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Age after which the session cache record is stale.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Delay before a freshly added notification hides its banner.
    #[serde(default = "default_banner_timeout")]
    pub banner_timeout_seconds: u64,
}

impl NotificationConfig {
    /// Cache TTL as a [`Duration`].
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Banner timeout as a [`Duration`].
    pub fn banner_timeout(&self) -> Duration {
        Duration::from_secs(self.banner_timeout_seconds)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: default_cache_ttl(),
            banner_timeout_seconds: default_banner_timeout(),
        }
    }
}

fn default_cache_ttl() -> u64 {
    5 * 60
}

fn default_banner_timeout() -> u64 {
    5
}
