//! Error responses of the store.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Request-level error type for the store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown collection or record. Answered with an empty JSON object.
    #[error("Not found")]
    NotFound,

    /// Missing or wrong API key on a write.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
            Self::Unauthorized(message) => {
                tracing::warn!(reason = message, "unauthorized write");
                (StatusCode::UNAUTHORIZED, message).into_response()
            }
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        fn get_status(err: ApiError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(ApiError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            get_status(ApiError::Unauthorized("Incorrect API key")),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(ApiError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::BadRequest("Request body must be a JSON object".to_string());
        assert_eq!(err.to_string(), "Request body must be a JSON object");
    }
}
