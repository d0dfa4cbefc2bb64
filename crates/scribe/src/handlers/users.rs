//! Sign-up, sign-in and sign-out handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use scribe_auth::BearerCredential;
use scribe_core::users::{SignInRequest, SignInResponse, SignUpRequest, UserProfile};

use super::{ApiError, ApiResponse};
use crate::state::AppState;

/// POST /api/users/signup
pub async fn sign_up(
    State(state): State<AppState>,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<ApiResponse<UserProfile>, ApiError> {
    let Json(request) = body?;
    let outcome = state.sessions.sign_up(request).await?;
    Ok(outcome.into())
}

/// POST /api/users/signin
pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<ApiResponse<SignInResponse>, ApiError> {
    let Json(request) = body?;
    let outcome = state.sessions.sign_in(request).await?;
    Ok(outcome.into())
}

/// POST /api/users/signout
///
/// Revokes every token of the caller, not only the one presented.
pub async fn sign_out(
    State(state): State<AppState>,
    credential: BearerCredential,
) -> Result<ApiResponse<String>, ApiError> {
    let outcome = state.sessions.sign_out(credential.as_deref()).await?;
    Ok(outcome.into())
}
