use std::{env, str::FromStr, time::Duration};

use scribe_core::cache::DEFAULT_COLLECTION_TTL;
use scribe_core::pagination::DEFAULT_PAGE_SIZE;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Collection cache TTL in seconds (default: 86,400)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-process cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Page size when a list request does not supply one (default: 10)
    pub default_page_size: usize,
    /// Path to SQLite database file (default: "scribe.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Number of pooled Redis clients for the revocation registry (default: 4)
    #[allow(dead_code)]
    pub redis_pool_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 86,400)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `DEFAULT_PAGE_SIZE` - List page size (default: 10)
    /// - `SQLITE_PATH` - SQLite database path (default: "scribe.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `REDIS_POOL_SIZE` - Registry pool size (default: 4)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: parsed(&lookup, "CACHE_TTL_SECONDS")
                .unwrap_or(DEFAULT_COLLECTION_TTL.as_secs()),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(10_000),
            default_page_size: parsed(&lookup, "DEFAULT_PAGE_SIZE").unwrap_or(DEFAULT_PAGE_SIZE),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "scribe.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            redis_pool_size: parsed(&lookup, "REDIS_POOL_SIZE").unwrap_or(4),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

/// Unset or unparseable values fall back to the caller's default.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_cache_ttl_conversion() {
        let config = Config {
            cache_ttl_seconds: 600,
            ..Config::default()
        };

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.cache_ttl_seconds, 86_400);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.sqlite_path, "scribe.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.redis_pool_size, 4);
    }

    #[test]
    fn test_lookup_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = [
            ("CACHE_TTL_SECONDS", "60"),
            ("CACHE_MAX_ENTRIES", "many"),
            ("DEFAULT_PAGE_SIZE", "25"),
            ("REDIS_POOL_SIZE", "8"),
            ("SQLITE_PATH", "/tmp/blog.db"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.redis_pool_size, 8);
        assert_eq!(config.sqlite_path, "/tmp/blog.db");
    }
}
