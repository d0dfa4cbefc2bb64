//! Redis cache implementation.
//!
//! Collections live under plain string keys (`posts`, `categories`) with a
//! server-side expiry, so every instance sharing the Redis sees the same
//! entry and the same invalidations.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;

use scribe_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend. `ConnectionManager` reconnects on its own, so a
/// dropped connection surfaces as a failed operation rather than a dead cache.
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connects to `url` and checks the server answers `PING`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the server is unreachable.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;

        let _: () = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(value)
    }

    /// `SET key value [EX seconds]`. Sub-second TTLs round up to one second.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }
        let _: () = cmd.query_async(&mut conn).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}
