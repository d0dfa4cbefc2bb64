//! Pure functions for serializing collections to and from cache bytes.
//!
//! Collections are stored as JSON arrays so cached values stay readable from
//! `redis-cli`. Element order is preserved in both directions.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a slice of records to a JSON array.
pub fn serialize_collection<T: Serialize>(items: &[T]) -> Result<Vec<u8>> {
    serde_json::to_vec(items).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes a JSON array back into records.
pub fn deserialize_collection<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
