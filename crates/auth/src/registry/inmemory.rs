//! In-memory revocation registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::auth::{Result, RevocationRegistry};

#[derive(Debug, Clone)]
struct RegistryEntry {
    marker: String,
    expires_at: Instant,
}

/// In-memory registry for development and testing.
///
/// Entries expire lazily: an expired entry reads as absent and is swept on
/// the next write. Data is lost when the registry is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: Arc<RwLock<HashMap<String, RegistryEntry>>>,
}

impl InMemoryRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live marker for `user_id`, if any.
    pub async fn marker(&self, user_id: &str) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(user_id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.marker.clone())
    }
}

#[async_trait]
impl RevocationRegistry for InMemoryRegistry {
    async fn register(&self, user_id: &str, marker: &str, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            user_id.to_string(),
            RegistryEntry {
                marker: marker.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn is_active(&self, user_id: &str) -> Result<bool> {
        Ok(self.marker(user_id).await.is_some())
    }

    async fn revoke(&self, user_id: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_revoke() {
        let registry = InMemoryRegistry::new();
        assert!(!registry.is_active("u1").await.unwrap());

        registry
            .register("u1", "token-a", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(registry.is_active("u1").await.unwrap());
        assert_eq!(registry.marker("u1").await.as_deref(), Some("token-a"));

        registry.revoke("u1").await.unwrap();
        assert!(!registry.is_active("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_replaces_marker() {
        let registry = InMemoryRegistry::new();
        let ttl = Duration::from_secs(60);
        registry.register("u1", "token-a", ttl).await.unwrap();
        registry.register("u1", "token-b", ttl).await.unwrap();
        assert_eq!(registry.marker("u1").await.as_deref(), Some("token-b"));
    }

    #[tokio::test]
    async fn test_revoke_missing_is_ok() {
        let registry = InMemoryRegistry::new();
        assert!(registry.revoke("nobody").await.is_ok());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let registry = InMemoryRegistry::new();
        registry
            .register("u1", "token-a", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!registry.is_active("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let registry = InMemoryRegistry::new();
        let clone = registry.clone();
        registry
            .register("u1", "t", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(clone.is_active("u1").await.unwrap());
    }
}
