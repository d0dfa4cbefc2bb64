use thiserror::Error;

use crate::auth::AuthError;
use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

/// Every way a content or session operation can fail, as seen by callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("jwt expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("server error: {0}")]
    ServerError(String),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError(_))
    }
}

impl From<AuthError> for ServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenExpired => Self::TokenExpired,
            AuthError::Unauthorized => Self::Unauthorized,
            AuthError::Signing(msg) | AuthError::Registry(msg) => Self::ServerError(msg),
            AuthError::MissingCredential
            | AuthError::MissingToken
            | AuthError::InvalidToken(_)
            | AuthError::Revoked
            | AuthError::InvalidCredentials => Self::Unauthenticated,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity_type, .. } => Self::NotFound(entity_type.to_string()),
            RepositoryError::AlreadyExists { entity_type, .. } => {
                Self::BadRequest(format!("{entity_type} already exists"))
            }
            RepositoryError::InvalidData(msg) => Self::BadRequest(msg),
            other => Self::ServerError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
