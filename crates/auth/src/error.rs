use scribe_core::service::ServiceError;
use thiserror::Error;

/// Auth errors for the scribe_auth crate.
///
/// This wraps the core `AuthError` and adds crate-specific error variants
/// for I/O operations that can't be in the functional core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (token parsing, authorization, ...)
    #[error(transparent)]
    Core(#[from] scribe_core::auth::AuthError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Password hashing or hash parsing failed
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<AuthError> for ServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Core(core) => core.into(),
            AuthError::Config(msg) | AuthError::PasswordHash(msg) => ServiceError::ServerError(msg),
        }
    }
}
