//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the stores, the password hasher and the token issuer.

pub mod auth;
pub mod menu;
pub mod person;

pub use auth::AuthService;
pub use menu::MenuService;
pub use person::PersonService;

use crate::error::ApiError;
use hotel_shared::validation;
use validator::Validate;

/// Run derive-based validation, mapping failures to a single message
pub(crate) fn validate_request<T: Validate>(request: &T) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::Validation(validation::first_error_message(&errors)))
}

/// Lift a field-rule failure into an API error
pub(crate) fn check(rule: Result<(), String>) -> Result<(), ApiError> {
    rule.map_err(ApiError::Validation)
}
