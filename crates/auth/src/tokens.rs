//! Signing and verification of bearer tokens (HS256 JWT).

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use scribe_core::auth::{calculate_expiry, AuthError, Result, TokenClaims, TokenPayload};

/// Issues and verifies tokens with a shared secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact; a token is dead the second after `exp`.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    /// Sign a token for `payload`, issued now.
    pub fn issue(&self, payload: TokenPayload) -> Result<String> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign a token for `payload` as if issued at `issued_at`.
    pub fn issue_at(&self, payload: TokenPayload, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = TokenClaims {
            data: payload,
            iat: issued_at.timestamp(),
            exp: calculate_expiry(issued_at, self.ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify the signature and expiry of `token` and decode its claims.
    ///
    /// Expiry is reported as [`AuthError::TokenExpired`]; every other failure,
    /// including a malformed permission map, as [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}
