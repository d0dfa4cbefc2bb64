//! Account and session lifecycle: sign-up, sign-in, sign-out, and the
//! administrative permission endpoints.

use std::sync::Arc;
use std::time::Duration;

use scribe_core::auth::{
    authorize_admin, AuthError as CoreError, RequestGate, Requiredness, RevocationRegistry, Role,
    TokenPayload,
};
use scribe_core::service::{Outcome, ServiceError, ServiceResult};
use scribe_core::storage::UserRepository;
use scribe_core::users::{
    normalize_email, PermissionRequest, SignInRequest, SignInResponse, SignUpRequest, User,
    UserProfile,
};
use uuid::Uuid;

use crate::password::{hash_password, verify_password};
use crate::{AuthError, TokenCodec};

/// Orchestrates account creation, sign-in and permission grants.
pub struct SessionService {
    users: Arc<dyn UserRepository>,
    registry: Arc<dyn RevocationRegistry>,
    codec: Arc<TokenCodec>,
    gate: Arc<dyn RequestGate>,
    registry_ttl: Duration,
}

impl SessionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        registry: Arc<dyn RevocationRegistry>,
        codec: Arc<TokenCodec>,
        gate: Arc<dyn RequestGate>,
        registry_ttl: Duration,
    ) -> Self {
        Self {
            users,
            registry,
            codec,
            gate,
            registry_ttl,
        }
    }

    /// Create a plain user account with no permissions.
    pub async fn sign_up(&self, request: SignUpRequest) -> ServiceResult<Outcome<UserProfile>> {
        let sign_up = request.validate()?;

        if self.users.get_user_by_email(&sign_up.email).await?.is_some() {
            return Err(ServiceError::BadRequest(
                "Email is already registered".to_string(),
            ));
        }

        let password_hash = hash_blocking(sign_up.password).await?;
        let user = User::new(
            sign_up.first_name,
            sign_up.last_name,
            sign_up.email,
            password_hash,
        );
        self.users.create_user(&user).await?;

        tracing::debug!(user_id = %user.id, "Created user");
        Ok(Outcome::Created(user.profile()))
    }

    /// Verify credentials, issue a token and record the user as signed in.
    pub async fn sign_in(&self, request: SignInRequest) -> ServiceResult<Outcome<SignInResponse>> {
        let (email, password) = request.validate()?;

        let user = self
            .users
            .get_user_by_email(&email)
            .await?
            .ok_or(CoreError::InvalidCredentials)?;

        if !verify_blocking(password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "Sign-in rejected: wrong password");
            return Err(CoreError::InvalidCredentials.into());
        }

        let token = self.codec.issue(TokenPayload {
            user_id: user.id.to_string(),
            role: user.role,
            permissions: user.permissions.clone(),
        })?;

        self.registry
            .register(&user.id.to_string(), &token, self.registry_ttl)
            .await?;

        tracing::debug!(user_id = %user.id, "User signed in");
        Ok(Outcome::Ok(SignInResponse {
            token,
            user: user.profile(),
        }))
    }

    /// Revoke the caller's registry entry. Every token of that user stops
    /// authenticating.
    pub async fn sign_out(&self, header: Option<&str>) -> ServiceResult<Outcome<String>> {
        let principal = self.gate.authenticate(header).await?;
        self.registry.revoke(&principal.user_id).await?;

        tracing::debug!(user_id = %principal.user_id, "User signed out");
        Ok(Outcome::Ok(principal.user_id))
    }

    /// Admin only: allow `method` on `resource` for `user_id`.
    ///
    /// The change reaches tokens issued at the user's next sign-in.
    pub async fn grant_permission(
        &self,
        header: Option<&str>,
        user_id: Uuid,
        request: PermissionRequest,
    ) -> ServiceResult<Outcome<UserProfile>> {
        self.admit_admin(header).await?;
        let (resource, method) = request.validate()?;

        let mut user = self.find_user(user_id).await?;
        user.permissions.grant(&resource, &method);
        self.users.update_user(&user).await?;

        tracing::debug!(user_id = %user.id, resource = %resource, method = %method, "Granted permission");
        Ok(Outcome::Created(user.profile()))
    }

    /// Admin only: remove `method` on `resource` from `user_id`.
    pub async fn revoke_permission(
        &self,
        header: Option<&str>,
        user_id: Uuid,
        request: PermissionRequest,
    ) -> ServiceResult<Outcome<UserProfile>> {
        self.admit_admin(header).await?;
        let (resource, method) = request.validate()?;

        let mut user = self.find_user(user_id).await?;
        if !user.permissions.revoke(&resource, &method) {
            return Err(ServiceError::not_found("Permission"));
        }
        self.users.update_user(&user).await?;

        tracing::debug!(user_id = %user.id, resource = %resource, method = %method, "Revoked permission");
        Ok(Outcome::Deleted(user.profile()))
    }

    /// Create the administrator account unless one with `email` exists.
    /// Returns true when an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> ServiceResult<bool> {
        let email = normalize_email(email);
        if self.users.get_user_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_blocking(password.to_string()).await?;
        let admin = User::new("Admin", "", email, password_hash).with_role(Role::Admin);
        self.users.create_user(&admin).await?;

        tracing::info!(user_id = %admin.id, "Created administrator account");
        Ok(true)
    }

    /// Admin API gate: authenticate, then require the Admin role.
    pub async fn admit_admin(&self, header: Option<&str>) -> ServiceResult<()> {
        let principal = self.gate.authenticate(header).await?;
        authorize_admin(&principal, Requiredness::Required)?;
        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }
}

async fn hash_blocking(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::ServerError(e.to_string()))?
        .map_err(ServiceError::from)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?
}
