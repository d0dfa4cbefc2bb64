use std::time::Duration;

/// Cache key holding the full category collection.
pub const CATEGORIES_KEY: &str = "categories";

/// Cache key holding the full joined post collection.
pub const POSTS_KEY: &str = "posts";

/// Default lifetime of a collection entry: one day.
pub const DEFAULT_COLLECTION_TTL: Duration = Duration::from_secs(24 * 60 * 60);
