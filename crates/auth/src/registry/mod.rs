//! Revocation registry implementations.
//!
//! Provides `RevocationRegistry` implementations for:
//! - In-memory (always available; single-process deployments and tests)
//! - Redis (with `redis` feature)

mod inmemory;
#[cfg(feature = "redis")]
mod redis_impl;

pub use inmemory::InMemoryRegistry;
#[cfg(feature = "redis")]
pub use redis_impl::RedisRegistry;
