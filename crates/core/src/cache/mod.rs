mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{CATEGORIES_KEY, DEFAULT_COLLECTION_TTL, POSTS_KEY};
pub use serialization::{deserialize_collection, serialize_collection, SerializationError};
pub use traits::Cache;
