//! Cache-aside store for whole collections.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use scribe_core::cache::{deserialize_collection, serialize_collection, Cache, CacheError};
use scribe_core::service::{ServiceError, ServiceResult};
use scribe_core::storage::RepositoryError;

/// Serves collection reads from a cache and falls back to a loader.
///
/// Cache failures never surface to callers: a broken backend degrades to a
/// loader call on every read.
#[derive(Clone)]
pub struct CacheAsideStore {
    cache: Arc<dyn Cache>,
}

impl CacheAsideStore {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Returns the collection stored under `key`, loading and caching it on miss.
    ///
    /// An empty collection is `NotFound(key)` and is never cached. Loader
    /// failures are `ServerError`.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> ServiceResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, RepositoryError>>,
    {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_collection::<T>(&bytes) {
                Ok(items) => {
                    tracing::trace!(key, count = items.len(), "Cache hit");
                    return Ok(items);
                }
                Err(err) => {
                    tracing::warn!(key, error = %err, "Cached collection unreadable");
                }
            },
            Ok(None) => tracing::trace!(key, "Cache miss"),
            Err(err) => tracing::warn!(key, error = %err, "Cache read failed"),
        }

        let items = loader()
            .await
            .map_err(|err| ServiceError::ServerError(err.to_string()))?;

        if items.is_empty() {
            return Err(ServiceError::not_found(key));
        }

        match serialize_collection(&items) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(ttl)).await {
                    tracing::warn!(key, error = %err, "Failed to cache collection");
                }
            }
            Err(err) => tracing::warn!(key, error = %err, "Failed to serialize collection"),
        }

        Ok(items)
    }

    /// Drops the entry under `key` so the next read reloads it.
    pub async fn invalidate(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(()) => tracing::trace!(key, "Cache invalidated"),
            Err(err) => tracing::warn!(key, error = %err, "Failed to invalidate cache"),
        }
    }

    /// Release the cache backend's connections.
    pub async fn close(&self) -> Result<(), CacheError> {
        self.cache.close().await
    }
}
