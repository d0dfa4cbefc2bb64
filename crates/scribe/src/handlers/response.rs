use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use scribe_core::service::Outcome;

/// Successful service outcome rendered as `{ "message", "data" }`.
pub struct ApiResponse<T>(pub Outcome<T>);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::OK);
        (status, Json(self.0.body())).into_response()
    }
}

impl<T> From<Outcome<T>> for ApiResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self(outcome)
    }
}
