//! Accounts and the payloads of the session and permission endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{Permissions, Role};
use crate::validation::{required, ValidationErrors};

/// Minimum accepted password length at sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A stored account. Holds the password hash, so it is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub permissions: Permissions,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a plain user with no permissions.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            permissions: Permissions::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role,
            permissions: self.permissions.clone(),
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Permissions,
}

/// Normalizes an email for lookups.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Request payload for creating an account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated sign-up fields. The password is still in clear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(self) -> Result<SignUp, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let first_name = required(&mut errors, "firstName", self.first_name);
        let last_name = required(&mut errors, "lastName", self.last_name);
        let email = required(&mut errors, "email", self.email);
        if !email.is_empty() && !email.contains('@') {
            errors.add("email", "email is invalid");
        }
        let password = match self.password {
            Some(p) if p.len() >= MIN_PASSWORD_LEN => p,
            Some(_) => {
                errors.add(
                    "password",
                    format!("password must be at least {MIN_PASSWORD_LEN} characters"),
                );
                String::new()
            }
            None => {
                errors.add("password", "password is required");
                String::new()
            }
        };
        errors.into_result(SignUp {
            first_name,
            last_name,
            email: normalize_email(&email),
            password,
        })
    }
}

/// Request payload for signing in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl SignInRequest {
    /// Returns the normalized email and the password.
    pub fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = required(&mut errors, "email", self.email);
        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => {
                errors.add("password", "password is required");
                String::new()
            }
        };
        errors.into_result((normalize_email(&email), password))
    }
}

/// Successful sign-in: the bearer token and the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Request payload for granting or revoking one permission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionRequest {
    pub resource: Option<String>,
    pub method: Option<String>,
}

impl PermissionRequest {
    /// Returns the resource name and the upper-cased operation name.
    pub fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let resource = required(&mut errors, "resource", self.resource);
        let method = required(&mut errors, "method", self.method);
        errors.into_result((resource, method.to_uppercase()))
    }
}
