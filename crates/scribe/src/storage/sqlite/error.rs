//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`.
//! Constraint failures become semantic variants so the service layer can
//! answer 400/404 instead of 500.

use rusqlite::ffi;
use scribe_core::storage::RepositoryError;

/// Context for an error: which entity, and its id when known.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    pub entity_type: &'static str,
    pub id: Option<&'a str>,
}

impl<'a> ErrorContext<'a> {
    pub fn entity(entity_type: &'static str) -> Self {
        Self {
            entity_type,
            id: None,
        }
    }

    pub fn with_id(entity_type: &'static str, id: &'a str) -> Self {
        Self {
            entity_type,
            id: Some(id),
        }
    }

    fn id(&self) -> String {
        self.id.unwrap_or("unknown").to_string()
    }
}

/// Maps a rusqlite error to a RepositoryError.
///
/// - UNIQUE / PRIMARY KEY violations → `AlreadyExists`
/// - FOREIGN KEY violations → `InvalidData`
/// - `CannotOpen` → `ConnectionFailed`
/// - `QueryReturnedNoRows` → `NotFound`
/// - everything else → `QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, ctx: ErrorContext<'_>) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            RepositoryError::AlreadyExists {
                entity_type: ctx.entity_type,
                id: ctx.id(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!(
                "{} references a missing record",
                ctx.entity_type
            ))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type: ctx.entity_type,
            id: ctx.id(),
        },

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    ctx: ErrorContext<'_>,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, ctx),
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
