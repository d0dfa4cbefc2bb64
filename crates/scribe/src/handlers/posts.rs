//! Post CRUD handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use scribe_auth::BearerCredential;
use scribe_core::content::{CreateContentRequest, Post, PostView, UpdateContentRequest};
use scribe_core::content::operations::{
    CREATE_POST, DELETE_POST, GET_POST, LIST_POSTS, UPDATE_POST,
};
use scribe_core::pagination::{Page, PageRequest};

use super::{admitted, ApiError, ApiResponse, ListQuery};
use crate::state::AppState;

/// GET /api/posts?page=&size=
pub async fn list_posts(
    State(state): State<AppState>,
    credential: BearerCredential,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<Page<PostView>>, ApiError> {
    let Query(query) = admitted(
        query,
        state.content.admit(credential.as_deref(), &LIST_POSTS),
    )
    .await?;
    let request =
        PageRequest::from_query(query.page, query.size, state.content.default_page_size());

    let outcome = state
        .content
        .list_posts(credential.as_deref(), request)
        .await?;
    Ok(outcome.into())
}

/// GET /api/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<PostView>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &GET_POST),
    )
    .await?;
    let outcome = state.content.get_post(credential.as_deref(), id).await?;
    Ok(outcome.into())
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    credential: BearerCredential,
    body: Result<Json<CreateContentRequest>, JsonRejection>,
) -> Result<ApiResponse<Post>, ApiError> {
    let Json(request) = admitted(
        body,
        state.content.admit(credential.as_deref(), &CREATE_POST),
    )
    .await?;
    let outcome = state
        .content
        .create_post(credential.as_deref(), request)
        .await?;
    Ok(outcome.into())
}

/// PUT /api/posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateContentRequest>, JsonRejection>,
) -> Result<ApiResponse<Post>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &UPDATE_POST),
    )
    .await?;
    let Json(request) = admitted(
        body,
        state.content.admit(credential.as_deref(), &UPDATE_POST),
    )
    .await?;
    let outcome = state
        .content
        .update_post(credential.as_deref(), id, request)
        .await?;
    Ok(outcome.into())
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    credential: BearerCredential,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiResponse<Post>, ApiError> {
    let Path(id) = admitted(
        id,
        state.content.admit(credential.as_deref(), &DELETE_POST),
    )
    .await?;
    let outcome = state.content.delete_post(credential.as_deref(), id).await?;
    Ok(outcome.into())
}
