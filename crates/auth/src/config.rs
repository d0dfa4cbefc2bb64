use std::time::Duration;

use crate::AuthError;

/// Credentials for the administrator account created at startup.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Lifetime of an issued token.
    pub token_ttl: Duration,
    /// Lifetime of a revocation registry entry, independent of `token_ttl`.
    pub registry_ttl: Duration,
    pub admin: Option<AdminBootstrap>,
}

impl AuthConfig {
    /// Configuration with default lifetimes and no admin bootstrap.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(60 * 60),
            registry_ttl: Duration::from_secs(24 * 60 * 60),
            admin: None,
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: token signing secret (required)
    /// - `JWT_TTL_SECONDS`: token lifetime (default: 3600)
    /// - `SESSION_TTL_SECONDS`: registry entry lifetime (default: 86400)
    /// - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: optional administrator account,
    ///   both must be set together
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is missing or the admin account is
    /// partially configured.
    pub fn from_env() -> Result<Self, AuthError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::Config("JWT_SECRET must be set".to_string()))?;

        let mut config = Self::new(jwt_secret);

        if let Some(ttl) = std::env::var("JWT_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.token_ttl = Duration::from_secs(ttl);
        }

        if let Some(ttl) = std::env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.registry_ttl = Duration::from_secs(ttl);
        }

        config.admin = match (std::env::var("ADMIN_EMAIL"), std::env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) => Some(AdminBootstrap { email, password }),
            (Err(_), Err(_)) => None,
            _ => {
                return Err(AuthError::Config(
                    "ADMIN_EMAIL and ADMIN_PASSWORD must be set together".to_string(),
                ))
            }
        };

        Ok(config)
    }
}
