use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Values are opaque bytes; callers own the encoding.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Deletes a value from the cache by key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Release backend connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
