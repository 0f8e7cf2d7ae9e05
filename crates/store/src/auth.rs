//! API key check for writes.
//!
//! GET requests pass through. Every other method must carry
//! `Authorization: Bearer <key>` with the configured key.

use axum::{
    extract::{Request, State},
    http::{Method, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;

use crate::error::ApiError;
use crate::state::StoreState;

pub const MISSING_HEADER: &str = "No \"Authorization\" header found.";
pub const MALFORMED_HEADER: &str = "\"Authorization\" header has wrong value.";
pub const WRONG_KEY: &str = "Incorrect API key";

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware rejecting unauthenticated writes with 401.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] when a non-GET request has no
/// `Authorization` header, a header without the `Bearer ` prefix, or the
/// wrong key.
pub async fn require_api_key(
    State(state): State<StoreState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() == Method::GET {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized(MISSING_HEADER))?;
    let key = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(ApiError::Unauthorized(MALFORMED_HEADER))?;

    if key != state.api_key().expose_secret() {
        return Err(ApiError::Unauthorized(WRONG_KEY));
    }

    Ok(next.run(request).await)
}
