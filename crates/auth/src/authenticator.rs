use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::auth::{parse_bearer, AuthError, Principal, RequestGate, Result, RevocationRegistry};

use crate::TokenCodec;

/// Resolves bearer tokens into principals.
///
/// A token is accepted when its signature verifies, it has not expired, and
/// its user id is still present in the revocation registry. Authentication
/// never writes to the registry.
pub struct TokenAuthenticator {
    codec: Arc<TokenCodec>,
    registry: Arc<dyn RevocationRegistry>,
}

impl TokenAuthenticator {
    pub fn new(codec: Arc<TokenCodec>, registry: Arc<dyn RevocationRegistry>) -> Self {
        Self { codec, registry }
    }
}

#[async_trait]
impl RequestGate for TokenAuthenticator {
    async fn authenticate(&self, header: Option<&str>) -> Result<Principal> {
        let token = parse_bearer(header)?;
        let claims = self.codec.verify(token)?;

        if !self.registry.is_active(&claims.data.user_id).await? {
            tracing::debug!(user_id = %claims.data.user_id, "Token rejected: no registry entry");
            return Err(AuthError::Revoked);
        }

        Ok(Principal::from_payload(claims.data, token))
    }
}
