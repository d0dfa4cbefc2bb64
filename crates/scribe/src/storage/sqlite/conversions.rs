//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use scribe_core::auth::{Permissions, Role};
use scribe_core::content::{Author, Category, Post, PostView};
use scribe_core::storage::RepositoryError;
use scribe_core::users::User;

/// Convert a SQLite row to a User.
///
/// Expected columns: id, first_name, last_name, email, password_hash, role,
/// permissions, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let role: String = row.get(5)?;
    let permissions: String = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(User {
        id: parse_uuid(&id)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        role: parse_role(&role)?,
        permissions: parse_permissions(&permissions)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to a Category.
///
/// Expected columns: id, title, content, created_at, updated_at
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Post.
///
/// Expected columns: id, title, content, author_id, created_at, updated_at
pub fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a joined post/user row to a PostView.
///
/// Expected columns: id, title, content, first_name, email
pub fn row_to_post_view(row: &Row) -> rusqlite::Result<PostView> {
    Ok(PostView {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        user: Author {
            first_name: row.get(3)?,
            email: row.get(4)?,
        },
    })
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Serialize a permission map for the `permissions` column.
pub fn permissions_to_json(permissions: &Permissions) -> Result<String, RepositoryError> {
    serde_json::to_string(permissions).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn conversion_error(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

/// Parse UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| conversion_error(0, e))
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(0, e))
}

/// Parse Role from string.
fn parse_role(s: &str) -> rusqlite::Result<Role> {
    s.parse::<Role>()
        .map_err(|msg| conversion_error(5, std::io::Error::other(msg)))
}

/// Parse the JSON permission map, applying its validation.
fn parse_permissions(s: &str) -> rusqlite::Result<Permissions> {
    serde_json::from_str(s).map_err(|e| conversion_error(6, e))
}
