//! Cache-aside layer in front of collection reads.
//!
//! - **Reads**: check the cache first, on miss load from the repository and
//!   populate the cache
//! - **Writes**: persist to the repository, then invalidate the collection key
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let store = CacheAsideStore::new(Arc::new(MemoryCache::new(10_000)));
//! let posts = store
//!     .get_or_load(POSTS_KEY, ttl, || repo.list_posts())
//!     .await?;
//! store.invalidate(POSTS_KEY).await;
//! ```

mod store;

pub use store::CacheAsideStore;
