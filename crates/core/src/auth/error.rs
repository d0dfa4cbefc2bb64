use thiserror::Error;

/// Failures of the authentication and authorization decision engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("bearer credential has no token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("jwt expired")]
    TokenExpired,

    #[error("session revoked")]
    Revoked,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("registry error: {0}")]
    Registry(String),
}
