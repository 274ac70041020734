//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use crate::repositories::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotel_shared::types::ErrorResponse;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
///
/// The `Display` text is for logs; clients only ever see
/// [`ApiError::public_message`].
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token not found")]
    TokenMissing,

    #[error("Malformed authorization header")]
    TokenMalformed,

    #[error("Invalid or expired token")]
    TokenInvalidOrExpired,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateUsername | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials
            | ApiError::TokenMissing
            | ApiError::TokenMalformed
            | ApiError::TokenInvalidOrExpired => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::DuplicateUsername => "DUPLICATE_USERNAME",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::TokenMissing => "TOKEN_MISSING",
            ApiError::TokenMalformed => "TOKEN_MALFORMED",
            ApiError::TokenInvalidOrExpired => "TOKEN_INVALID",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message sent to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => {
                msg.clone()
            }
            ApiError::DuplicateUsername => "Username already taken".to_string(),
            ApiError::InvalidCredentials => "Invalid user name or password".to_string(),
            ApiError::TokenMissing => "Token not found".to_string(),
            ApiError::TokenMalformed => "Unauthorized".to_string(),
            ApiError::TokenInvalidOrExpired => "Invalid Token".to_string(),
            ApiError::Internal(_) => "Internal Server Error".to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field: "username" } => ApiError::DuplicateUsername,
            StoreError::Duplicate { field } => {
                ApiError::Conflict(format!("A record with this {} already exists", field))
            }
            StoreError::Backend(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!("Internal error: {:?}", err);
        }

        let body = Json(ErrorResponse {
            error: self.public_message(),
            code: self.code().to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("Person not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_store_error_maps_to_duplicate_username() {
        let error: ApiError = StoreError::Duplicate { field: "username" }.into();
        assert!(matches!(error, ApiError::DuplicateUsername));
        assert_eq!(error.status(), StatusCode::CONFLICT);

        let error: ApiError = StoreError::Duplicate { field: "email" }.into();
        assert!(matches!(error, ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_token_errors_have_stable_messages() {
        for (error, message) in [
            (ApiError::TokenMissing, "Token not found"),
            (ApiError::TokenMalformed, "Unauthorized"),
            (ApiError::TokenInvalidOrExpired, "Invalid Token"),
        ] {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_json(response).await["error"], message);
        }
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("connection refused to 10.0.0.5"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal Server Error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }
}
