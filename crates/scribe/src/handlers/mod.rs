pub mod categories;
pub mod error;
pub mod health;
pub mod permissions;
pub mod posts;
pub mod response;
pub mod users;

pub use error::ApiError;
pub use response::ApiResponse;

use std::future::Future;

use scribe_core::service::ServiceResult;
use serde::Deserialize;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Unwrap an extracted input. A malformed input is reported only after the
/// caller passes `gate`, so unauthenticated requests get 401 whatever they
/// send. The gate future is not polled when the input is well formed.
pub(crate) async fn admitted<T, R, G, F>(input: Result<T, R>, gate: F) -> Result<T, ApiError>
where
    ApiError: From<R>,
    F: Future<Output = ServiceResult<G>>,
{
    match input {
        Ok(value) => Ok(value),
        Err(rejection) => {
            gate.await?;
            Err(rejection.into())
        }
    }
}
