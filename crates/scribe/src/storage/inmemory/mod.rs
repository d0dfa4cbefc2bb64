//! In-memory storage backend.
//!
//! Stores all data in maps wrapped in `Arc<RwLock<_>>`. Used for development
//! and as the default backend in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
