use std::time::Duration;

use async_trait::async_trait;

use super::{authorize, AuthError, Operation, Principal};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Server-side record of signed-in users.
///
/// A token is honoured only while its user id is present here. Entries carry
/// their own TTL, independent of token expiry.
#[async_trait]
pub trait RevocationRegistry: Send + Sync {
    /// Record `user_id` as signed in, replacing any previous marker.
    async fn register(&self, user_id: &str, marker: &str, ttl: Duration) -> Result<()>;

    /// Whether `user_id` currently has an entry.
    async fn is_active(&self, user_id: &str) -> Result<bool>;

    /// Remove the entry for `user_id`. Missing entries are not an error.
    async fn revoke(&self, user_id: &str) -> Result<()>;

    /// Release backend connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Authentication followed by authorization, the gate in front of every
/// content operation.
#[async_trait]
pub trait RequestGate: Send + Sync {
    /// Resolve an `Authorization` header value into a principal.
    async fn authenticate(&self, header: Option<&str>) -> Result<Principal>;

    /// Decide whether `principal` may perform `operation`.
    fn authorize(&self, principal: &Principal, operation: &Operation) -> Result<()> {
        authorize(
            principal,
            operation.resource,
            operation.method,
            operation.requiredness,
        )
    }

    /// Authenticate then authorize; the first failure wins.
    async fn admit(&self, header: Option<&str>, operation: &Operation) -> Result<Principal> {
        let principal = self.authenticate(header).await?;
        self.authorize(&principal, operation)?;
        Ok(principal)
    }
}
