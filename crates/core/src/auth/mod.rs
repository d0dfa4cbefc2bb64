mod error;
mod functions;
mod permissions;
mod traits;
mod types;

pub use error::AuthError;
pub use functions::{calculate_expiry, is_expired, parse_bearer};
pub use permissions::{authorize, authorize_admin};
pub use traits::{RequestGate, Result, RevocationRegistry};
pub use types::{
    Operation, Permissions, PermissionsError, Principal, Requiredness, Role, TokenClaims,
    TokenPayload,
};
