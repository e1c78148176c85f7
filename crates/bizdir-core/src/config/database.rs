//! Database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// PostgreSQL pool settings.
///
/// The pool is sized for an admin backend: a handful of concurrent
/// request handlers plus background seeding, not a high-fanout API tier.
/// Every field except `url` falls back to the defaults below when the
/// configuration file omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Seconds to wait for a free connection before giving up.
    pub acquire_timeout_seconds: u64,
    /// Seconds an idle connection survives before being dropped.
    pub idle_timeout_seconds: u64,
    /// Seconds a connection lives before being recycled.
    pub max_lifetime_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_seconds: 5,
            idle_timeout_seconds: 600,
            max_lifetime_seconds: 1800,
        }
    }
}

impl DatabaseConfig {
    /// Acquire timeout as a [`Duration`].
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    /// Connection lifetime as a [`Duration`].
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/bizdir"}"#).unwrap();
        assert_eq!(config.url, "postgres://localhost/bizdir");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert_eq!(config.max_lifetime(), Duration::from_secs(1800));
    }
}
