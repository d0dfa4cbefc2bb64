mod error;
mod http_mapping;
mod outcome;

pub use error::{ServiceError, ServiceResult};
pub use http_mapping::{
    service_error_body, service_error_to_status_code, service_error_type, SERVER_ERROR_MESSAGE,
};
pub use outcome::{Outcome, SuccessBody};
