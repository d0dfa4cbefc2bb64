use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Account role. Admins bypass permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::User => write!(f, "User"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "User" => Ok(Self::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Error returned when a permission map contains blank names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionsError {
    #[error("permission resource name must not be empty")]
    EmptyResource,
    #[error("operation name for resource {0} must not be empty")]
    EmptyOperation(String),
}

/// Per-user allow-list: resource name to the set of operation names.
///
/// Operation names are HTTP verbs (`GET`, `POST`, ...). Decoding rejects
/// blank names and collapses duplicate operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Vec<String>>",
    into = "BTreeMap<String, Vec<String>>"
)]
pub struct Permissions(BTreeMap<String, BTreeSet<String>>);

impl Permissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style grant, used mostly by tests and fixtures.
    pub fn with(mut self, resource: &str, operation: &str) -> Self {
        self.grant(resource, operation);
        self
    }

    /// Adds `operation` to `resource`. Returns false if it was already allowed.
    pub fn grant(&mut self, resource: &str, operation: &str) -> bool {
        self.0
            .entry(resource.to_string())
            .or_default()
            .insert(operation.to_string())
    }

    /// Removes `operation` from `resource`, dropping the resource once empty.
    /// Returns false if it was not allowed.
    pub fn revoke(&mut self, resource: &str, operation: &str) -> bool {
        let Some(operations) = self.0.get_mut(resource) else {
            return false;
        };
        let removed = operations.remove(operation);
        if operations.is_empty() {
            self.0.remove(resource);
        }
        removed
    }

    pub fn allows(&self, resource: &str, operation: &str) -> bool {
        self.0
            .get(resource)
            .is_some_and(|operations| operations.contains(operation))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for Permissions {
    type Error = PermissionsError;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        let mut map = BTreeMap::new();
        for (resource, operations) in raw {
            if resource.trim().is_empty() {
                return Err(PermissionsError::EmptyResource);
            }
            let mut set = BTreeSet::new();
            for operation in operations {
                if operation.trim().is_empty() {
                    return Err(PermissionsError::EmptyOperation(resource));
                }
                set.insert(operation);
            }
            map.insert(resource, set);
        }
        Ok(Self(map))
    }
}

impl From<Permissions> for BTreeMap<String, Vec<String>> {
    fn from(permissions: Permissions) -> Self {
        permissions
            .0
            .into_iter()
            .map(|(resource, operations)| (resource, operations.into_iter().collect()))
            .collect()
    }
}

/// The `data` section of a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: Permissions,
}

/// Full claim set of a signed token. `exp` and `iat` are unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub data: TokenPayload,
    pub exp: i64,
    pub iat: i64,
}

/// Identity attached to a request after authentication. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    pub permissions: Permissions,
    pub raw_token: String,
}

impl Principal {
    pub fn from_payload(payload: TokenPayload, raw_token: impl Into<String>) -> Self {
        Self {
            user_id: payload.user_id,
            role: payload.role,
            permissions: payload.permissions,
            raw_token: raw_token.into(),
        }
    }

    pub fn has_user_id(&self) -> bool {
        !self.user_id.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Whether an operation demands an identified caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requiredness {
    Required,
    Optional,
}

/// A gated operation: resource name, operation (HTTP verb) and requiredness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub resource: &'static str,
    pub method: &'static str,
    pub requiredness: Requiredness,
}

impl Operation {
    pub const fn required(resource: &'static str, method: &'static str) -> Self {
        Self {
            resource,
            method,
            requiredness: Requiredness::Required,
        }
    }

    pub const fn optional(resource: &'static str, method: &'static str) -> Self {
        Self {
            resource,
            method,
            requiredness: Requiredness::Optional,
        }
    }
}
