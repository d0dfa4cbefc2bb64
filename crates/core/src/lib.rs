//! Functional core of scribe: domain types, the authorization decision
//! engine, pagination, and the traits the server implements for storage,
//! caching and revocation.

pub mod auth;
pub mod cache;
pub mod content;
pub mod pagination;
pub mod service;
pub mod storage;
pub mod users;
pub mod validation;
