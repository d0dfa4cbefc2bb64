//! Token authentication for scribe.
//!
//! This crate provides:
//! - HS256 token issuing and verification
//! - Revocation registries (in-memory, or Redis via the `redis` feature)
//! - The request gate used by every content operation
//! - Sign-up, sign-in, sign-out and admin permission grants
//! - Axum extractors for the bearer credential

mod authenticator;
mod config;
mod error;
mod extractors;
mod password;
pub mod registry;
mod sessions;
mod tokens;

pub use authenticator::TokenAuthenticator;
pub use config::{AdminBootstrap, AuthConfig};
pub use error::AuthError;
pub use extractors::BearerCredential;
pub use password::{hash_password, verify_password};
pub use sessions::SessionService;
pub use tokens::TokenCodec;
