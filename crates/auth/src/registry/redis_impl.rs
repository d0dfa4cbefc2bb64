//! Redis revocation registry.
//!
//! One string key per user: key = user id, value = marker, with a TTL.

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;
use scribe_core::auth::{AuthError, Result, RevocationRegistry};

/// Redis-backed revocation registry.
pub struct RedisRegistry {
    pool: Pool,
}

impl RedisRegistry {
    /// Wraps an initialized connection pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Connects a pool of `pool_size` clients to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails.
    pub async fn connect(url: &str, pool_size: usize) -> Result<Self> {
        let config = Config::from_url(url).map_err(|e| AuthError::Registry(e.to_string()))?;
        let pool = Builder::from_config(config)
            .build_pool(pool_size)
            .map_err(|e| AuthError::Registry(e.to_string()))?;
        let _connection_task = pool
            .init()
            .await
            .map_err(|e| AuthError::Registry(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RevocationRegistry for RedisRegistry {
    async fn register(&self, user_id: &str, marker: &str, ttl: Duration) -> Result<()> {
        let ttl_secs = ttl.as_secs().max(1) as i64;
        self.pool
            .set::<(), _, _>(user_id, marker, Some(Expiration::EX(ttl_secs)), None, false)
            .await
            .map_err(|e| AuthError::Registry(e.to_string()))
    }

    async fn is_active(&self, user_id: &str) -> Result<bool> {
        let marker: Option<String> = self
            .pool
            .get(user_id)
            .await
            .map_err(|e| AuthError::Registry(e.to_string()))?;
        Ok(marker.is_some_and(|m| !m.is_empty()))
    }

    async fn revoke(&self, user_id: &str) -> Result<()> {
        self.pool
            .del::<(), _>(user_id)
            .await
            .map_err(|e| AuthError::Registry(e.to_string()))
    }

    async fn close(&self) -> Result<()> {
        self.pool
            .quit()
            .await
            .map_err(|e| AuthError::Registry(e.to_string()))
    }
}
