//! Request and response DTOs.

pub mod request;
pub mod response;

use validator::Validate;

use docbox_core::error::AppError;

/// Run validator-derive checks, mapping failures to a validation error.
pub fn validate<T: Validate>(request: &T) -> Result<(), AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}
