//! Database Settings

use serde::Deserialize;

/// Connection settings for the measure store
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: String,
    /// Seconds between connectivity probe retries at startup
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
    /// Pool shape
    #[serde(default)]
    pub pool: PoolSettings,
}

/// Connection pool shape
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Connections kept open even when idle
    pub min_connections: u32,
    /// Hard ceiling on concurrent connections
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing fast
    pub acquire_timeout_secs: u64,
    /// Seconds an idle connection may live before being reaped
    pub idle_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_connections: 2,
            max_connections: 6,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 30,
        }
    }
}

fn default_retry_delay() -> u64 {
    5
}
