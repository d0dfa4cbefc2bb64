//! Redis error mapping to CacheError.

use redis::{ErrorKind, RedisError};
use scribe_core::cache::CacheError;

/// Unreachable servers become `ConnectionFailed` so the store treats them as
/// a miss; a reply that is not a byte string is reported as `Serialization`.
pub fn map_redis_error(err: RedisError) -> CacheError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CacheError::ConnectionFailed(err.to_string())
    } else if err.kind() == ErrorKind::TypeError {
        CacheError::Serialization(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}
