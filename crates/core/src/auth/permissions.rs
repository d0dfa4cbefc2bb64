//! Pure authorization decisions.
//!
//! Both functions are deterministic over their inputs and perform no I/O, so
//! every request path can call them after authentication without suspending.

use super::{AuthError, Principal, Requiredness, Role};

/// Decide whether `principal` may perform `operation` on `resource`.
///
/// Rules, first match wins:
/// 1. Admins are always allowed.
/// 2. A required operation is denied to a principal with no user id and no
///    permissions.
/// 3. Allowed when the permission map lists `operation` under `resource`.
/// 4. Denied otherwise.
pub fn authorize(
    principal: &Principal,
    resource: &str,
    operation: &str,
    requiredness: Requiredness,
) -> Result<(), AuthError> {
    if principal.is_admin() {
        return Ok(());
    }

    if requiredness == Requiredness::Required
        && !principal.has_user_id()
        && principal.permissions.is_empty()
    {
        return Err(AuthError::Unauthorized);
    }

    if principal.permissions.allows(resource, operation) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Gate for the administrative API: plain users are turned away from
/// required operations.
pub fn authorize_admin(principal: &Principal, requiredness: Requiredness) -> Result<(), AuthError> {
    match (principal.role, requiredness) {
        (Role::User, Requiredness::Required) => Err(AuthError::Unauthorized),
        _ => Ok(()),
    }
}
