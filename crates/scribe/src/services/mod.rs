//! Content orchestration: gate, validate, persist, keep the cache coherent.
//!
//! Every operation admits the caller through the [`RequestGate`] before any
//! repository or cache access. Writes persist first and then invalidate the
//! collection key of the resource they touched.

mod categories;
mod posts;

#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;

use scribe_core::auth::{Operation, Principal, RequestGate};
use scribe_core::service::ServiceResult;
use scribe_core::storage::{CategoryRepository, PostRepository};

use crate::storage::CacheAsideStore;

/// Category and post operations behind one gate.
pub struct ContentService {
    gate: Arc<dyn RequestGate>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    store: CacheAsideStore,
    ttl: Duration,
    default_page_size: usize,
}

impl ContentService {
    pub fn new(
        gate: Arc<dyn RequestGate>,
        categories: Arc<dyn CategoryRepository>,
        posts: Arc<dyn PostRepository>,
        store: CacheAsideStore,
        ttl: Duration,
    ) -> Self {
        Self {
            gate,
            categories,
            posts,
            store,
            ttl,
            default_page_size: scribe_core::pagination::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Page size used when a list request does not carry one.
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Run the gate alone, for requests rejected before reaching an operation.
    pub async fn admit(
        &self,
        credential: Option<&str>,
        operation: &Operation,
    ) -> ServiceResult<Principal> {
        Ok(self.gate.admit(credential, operation).await?)
    }

    /// The cache-aside store, for lifecycle management.
    pub fn store(&self) -> &CacheAsideStore {
        &self.store
    }
}
