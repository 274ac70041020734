//! Authentication middleware
//!
//! The auth gate for protected routes. Per request:
//! - no `Authorization` header -> `TokenMissing`
//! - a header that is not `Bearer <token>` -> `TokenMalformed`
//! - a token with a bad signature, bad payload or past expiry -> `TokenInvalidOrExpired`
//! - otherwise the decoded identity is attached to the request
//!
//! The check is stateless: the person store is never consulted, so a token
//! stays valid until it expires even if its record is deleted.

use crate::auth::jwt::JwtService;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

/// Authenticated staff member decoded from the bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Extract the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(AUTHORIZATION).ok_or(ApiError::TokenMissing)?;
    let value = value.to_str().map_err(|_| ApiError::TokenMalformed)?.trim();
    if value.is_empty() {
        return Err(ApiError::TokenMissing);
    }

    let (scheme, token) = value.split_once(' ').ok_or(ApiError::TokenMalformed)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(ApiError::TokenMalformed);
    }
    Ok(token)
}

/// Run the full gate against a set of headers
pub fn authenticate(jwt: &JwtService, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = bearer_token(headers)?;
    let claims = jwt.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::TokenInvalidOrExpired
    })?;

    Ok(AuthUser {
        id: claims.id,
        username: claims.username,
    })
}

/// Extractor form of the gate
///
/// Reuses the identity attached by [`require_auth`] when the route sits
/// behind that layer.
#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        authenticate(app_state.jwt(), &parts.headers)
    }
}

/// Layer form of the gate, applied to whole route groups
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(state.jwt(), request.headers())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
