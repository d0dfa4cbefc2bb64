//! SQLite storage backend implementation.
//!
//! Implements the repository traits using `rusqlite` for synchronous
//! operations and `tokio-rusqlite` for async wrapping. Categories and posts
//! use `INTEGER PRIMARY KEY AUTOINCREMENT` so deleted ids are never reissued.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
