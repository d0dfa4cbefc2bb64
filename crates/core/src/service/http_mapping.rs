//! Pure functions for mapping service errors to HTTP responses.
//!
//! Validation failures render as a flat field map under `errors`; every other
//! kind renders as `{ "errors": { "message", "type" } }`.

use serde_json::{json, Value};

use super::ServiceError;

/// Message shown to callers for server errors. Details stay in the logs.
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `Unauthenticated`, `TokenExpired` -> 401
/// - `Unauthorized` -> 403
/// - `BadRequest` -> 400
/// - `NotFound` -> 404
/// - `Validation` -> 422
/// - `ServerError` -> 500
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::Unauthenticated | ServiceError::TokenExpired => 401,
        ServiceError::Unauthorized => 403,
        ServiceError::BadRequest(_) => 400,
        ServiceError::NotFound(_) => 404,
        ServiceError::Validation(_) => 422,
        ServiceError::ServerError(_) => 500,
    }
}

/// Machine-readable error type carried in the envelope.
pub fn service_error_type(error: &ServiceError) -> &'static str {
    match error {
        ServiceError::Unauthenticated => "UNAUTHENTICATED",
        ServiceError::TokenExpired => "JWT_EXPIRED_ERROR",
        ServiceError::Unauthorized => "UNAUTHORIZED",
        ServiceError::BadRequest(_) => "BAD_REQUEST",
        ServiceError::NotFound(_) => "NOT_FOUND",
        ServiceError::Validation(_) => "VALIDATION_ERROR",
        ServiceError::ServerError(_) => "SERVER_ERROR",
    }
}

/// Builds the JSON error envelope.
pub fn service_error_body(error: &ServiceError) -> Value {
    match error {
        ServiceError::Validation(errors) => json!({ "errors": errors }),
        ServiceError::ServerError(_) => json!({
            "errors": {
                "message": SERVER_ERROR_MESSAGE,
                "type": service_error_type(error),
            }
        }),
        other => json!({
            "errors": {
                "message": other.to_string(),
                "type": service_error_type(other),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrors;

    #[test]
    fn test_status_codes() {
        assert_eq!(service_error_to_status_code(&ServiceError::Unauthenticated), 401);
        assert_eq!(service_error_to_status_code(&ServiceError::TokenExpired), 401);
        assert_eq!(service_error_to_status_code(&ServiceError::Unauthorized), 403);
        assert_eq!(
            service_error_to_status_code(&ServiceError::BadRequest("x".into())),
            400
        );
        assert_eq!(
            service_error_to_status_code(&ServiceError::NotFound("Post".into())),
            404
        );
        assert_eq!(
            service_error_to_status_code(&ServiceError::Validation(ValidationErrors::new())),
            422
        );
        assert_eq!(
            service_error_to_status_code(&ServiceError::ServerError("x".into())),
            500
        );
    }

    #[test]
    fn test_expired_token_envelope() {
        assert_eq!(
            service_error_body(&ServiceError::TokenExpired),
            json!({"errors": {"message": "jwt expired", "type": "JWT_EXPIRED_ERROR"}})
        );
    }

    #[test]
    fn test_validation_envelope_is_field_map() {
        let errors = ValidationErrors::single("title", "title is required");
        assert_eq!(
            service_error_body(&ServiceError::Validation(errors)),
            json!({"errors": {"title": "title is required"}})
        );
    }

    #[test]
    fn test_server_error_hides_details() {
        let body = service_error_body(&ServiceError::ServerError("disk I/O error".into()));
        assert_eq!(body["errors"]["message"], SERVER_ERROR_MESSAGE);
        assert_eq!(body["errors"]["type"], "SERVER_ERROR");
    }

    #[test]
    fn test_not_found_envelope() {
        assert_eq!(
            service_error_body(&ServiceError::not_found("Category")),
            json!({"errors": {"message": "Category not found", "type": "NOT_FOUND"}})
        );
    }
}
