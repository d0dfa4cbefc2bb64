//! Admin API for editing a user's permission map.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use uuid::Uuid;

use scribe_auth::BearerCredential;
use scribe_core::users::{PermissionRequest, UserProfile};

use super::{admitted, ApiError, ApiResponse};
use crate::state::AppState;

/// POST /admin-api/user-permissions/{userId}
pub async fn grant_permission(
    State(state): State<AppState>,
    credential: BearerCredential,
    user_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PermissionRequest>, JsonRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let Path(user_id) = admitted(
        user_id,
        state.sessions.admit_admin(credential.as_deref()),
    )
    .await?;
    let Json(request) = admitted(
        body,
        state.sessions.admit_admin(credential.as_deref()),
    )
    .await?;
    let outcome = state
        .sessions
        .grant_permission(credential.as_deref(), user_id, request)
        .await?;
    Ok(outcome.into())
}

/// DELETE /admin-api/user-permissions/{userId}
pub async fn revoke_permission(
    State(state): State<AppState>,
    credential: BearerCredential,
    user_id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<PermissionRequest>, JsonRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let Path(user_id) = admitted(
        user_id,
        state.sessions.admit_admin(credential.as_deref()),
    )
    .await?;
    let Json(request) = admitted(
        body,
        state.sessions.admit_admin(credential.as_deref()),
    )
    .await?;
    let outcome = state
        .sessions
        .revoke_permission(credential.as_deref(), user_id, request)
        .await?;
    Ok(outcome.into())
}
