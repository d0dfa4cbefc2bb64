//! Application state.
//!
//! Backends are chosen by Cargo features and constructed explicitly at
//! startup; handlers only see the two services. `close()` releases every
//! external connection on shutdown.

use std::sync::Arc;

use scribe_auth::{AuthConfig, SessionService, TokenAuthenticator, TokenCodec};
use scribe_core::auth::{RequestGate, RevocationRegistry};
use scribe_core::cache::Cache;
use scribe_core::storage::{CategoryRepository, PostRepository, UserRepository};

use crate::config::Config;
use crate::services::ContentService;
use crate::storage::CacheAsideStore;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub sessions: Arc<SessionService>,
    registry: Arc<dyn RevocationRegistry>,
}

/// The three repository capabilities, usually backed by one store.
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn from_shared<R>(repo: Arc<R>) -> Self
    where
        R: CategoryRepository + PostRepository + UserRepository + 'static,
    {
        Self {
            categories: repo.clone(),
            posts: repo.clone(),
            users: repo,
        }
    }
}

impl AppState {
    /// Wire services from already-constructed backends.
    pub fn from_parts(
        repos: Repositories,
        cache: Arc<dyn Cache>,
        registry: Arc<dyn RevocationRegistry>,
        config: &Config,
        auth: &AuthConfig,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(&auth.jwt_secret, auth.token_ttl));
        let gate: Arc<dyn RequestGate> =
            Arc::new(TokenAuthenticator::new(codec.clone(), registry.clone()));

        let content = ContentService::new(
            gate.clone(),
            repos.categories,
            repos.posts,
            CacheAsideStore::new(cache),
            config.cache_ttl(),
        )
        .with_default_page_size(config.default_page_size);

        let sessions = SessionService::new(
            repos.users,
            registry.clone(),
            codec,
            gate,
            auth.registry_ttl,
        );

        Self {
            content: Arc::new(content),
            sessions: Arc::new(sessions),
            registry,
        }
    }

    /// Build state from configuration using the feature-selected backends.
    pub async fn new(config: &Config, auth: &AuthConfig) -> anyhow::Result<Self> {
        let repos = backends::open_repositories(config).await?;
        let cache = backends::open_cache(config).await?;
        let registry = backends::open_registry(config).await?;

        Ok(Self::from_parts(repos, cache, registry, config, auth))
    }

    /// Close cache and registry connections. Failures are logged.
    pub async fn close(&self) {
        if let Err(err) = self.content.store().close().await {
            tracing::warn!(error = %err, "Failed to close cache");
        }
        if let Err(err) = self.registry.close().await {
            tracing::warn!(error = %err, "Failed to close revocation registry");
        }
    }
}

// ============================================================================
// Factory functions for the feature-selected backends
// ============================================================================

mod backends {
    use super::*;

    #[cfg(feature = "inmemory")]
    pub async fn open_repositories(_config: &Config) -> anyhow::Result<Repositories> {
        use crate::storage::inmemory::InMemoryRepository;

        tracing::info!("Using in-memory storage");
        Ok(Repositories::from_shared(Arc::new(InMemoryRepository::new())))
    }

    #[cfg(feature = "sqlite")]
    pub async fn open_repositories(config: &Config) -> anyhow::Result<Repositories> {
        use crate::storage::sqlite::SqliteRepository;

        tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
        let repo = SqliteRepository::new(&config.sqlite_path).await?;
        Ok(Repositories::from_shared(Arc::new(repo)))
    }

    #[cfg(feature = "memory")]
    pub async fn open_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
        use crate::cache::MemoryCache;

        Ok(Arc::new(MemoryCache::new(config.cache_max_entries)))
    }

    #[cfg(feature = "redis")]
    pub async fn open_cache(config: &Config) -> anyhow::Result<Arc<dyn Cache>> {
        use crate::cache::RedisCache;

        tracing::info!(url = %config.redis_url, "Using Redis cache");
        Ok(Arc::new(RedisCache::new(&config.redis_url).await?))
    }

    #[cfg(not(feature = "redis"))]
    pub async fn open_registry(_config: &Config) -> anyhow::Result<Arc<dyn RevocationRegistry>> {
        use scribe_auth::registry::InMemoryRegistry;

        Ok(Arc::new(InMemoryRegistry::new()))
    }

    #[cfg(feature = "redis")]
    pub async fn open_registry(config: &Config) -> anyhow::Result<Arc<dyn RevocationRegistry>> {
        use scribe_auth::registry::RedisRegistry;

        let registry = RedisRegistry::connect(&config.redis_url, config.redis_pool_size).await?;
        Ok(Arc::new(registry))
    }
}
