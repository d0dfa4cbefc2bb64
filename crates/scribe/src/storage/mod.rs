//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `scribe_core::storage`, selected at compile time via feature flags, plus
//! the cache-aside layer that sits in front of collection reads.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local maps, nothing persisted
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive.
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p scribe --no-default-features --features sqlite,memory
//! ```

#[cfg(all(feature = "inmemory", feature = "sqlite"))]
compile_error!(
    "Features 'inmemory' and 'sqlite' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p scribe --features sqlite"
);

pub mod cached;

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CacheAsideStore;
