//! Category CRUD handlers.
//!
//! Each handler forwards the raw credential to the content service, which
//! gates the call before touching storage.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use scribe_auth::BearerCredential;
use scribe_core::content::{Category, CreateContentRequest, UpdateContentRequest};
use scribe_core::content::operations::{
    CREATE_CATEGORY, DELETE_CATEGORY, GET_CATEGORY, LIST_CATEGORIES, UPDATE_CATEGORY,
};
use scribe_core::pagination::{Page, PageRequest};

use super::{admitted, ApiError, ApiResponse, ListQuery};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    credential: BearerCredential,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<Page<Category>>, ApiError> {
    let Query(query) = admitted(
        query,
        state.content.admit(credential.as_deref(), &LIST_CATEGORIES),
    )
    .await?;
    let request =
        PageRequest::from_query(query.page, query.size, state.content.default_page_size());

    let outcome = state
        .content
        .list_categories(credential.as_deref(), request)
        .await?;
    Ok(outcome.into())
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Category>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &GET_CATEGORY),
    )
    .await?;
    let outcome = state.content.get_category(credential.as_deref(), id).await?;
    Ok(outcome.into())
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    credential: BearerCredential,
    body: Result<Json<CreateContentRequest>, JsonRejection>,
) -> Result<ApiResponse<Category>, ApiError> {
    let Json(request) = admitted(
        body,
        state.content.admit(credential.as_deref(), &CREATE_CATEGORY),
    )
    .await?;
    let outcome = state
        .content
        .create_category(credential.as_deref(), request)
        .await?;
    Ok(outcome.into())
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateContentRequest>, JsonRejection>,
) -> Result<ApiResponse<Category>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &UPDATE_CATEGORY),
    )
    .await?;
    let Json(request) = admitted(
        body,
        state.content.admit(credential.as_deref(), &UPDATE_CATEGORY),
    )
    .await?;
    let outcome = state
        .content
        .update_category(credential.as_deref(), id, request)
        .await?;
    Ok(outcome.into())
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Category>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &DELETE_CATEGORY),
    )
    .await?;
    let outcome = state
        .content
        .delete_category(credential.as_deref(), id)
        .await?;
    Ok(outcome.into())
}
