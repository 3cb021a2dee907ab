//! Error types for the cache service
//!
//! Provides unified error handling using thiserror. Cache operations never
//! fail; these errors belong to the HTTP boundary and the backing store.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::cache::UnknownNamespace;
use crate::models::ErrorResponse;

// == Api Error Enum ==
/// Errors returned by the management endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data (unknown action or tag)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<UnknownNamespace> for ApiError {
    fn from(err: UnknownNamespace) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Source Error Enum ==
/// Failures reported by a backing store.
///
/// Passed through the cache-aside layer untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store could not be reached
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),

    /// The store refused a write
    #[error("Rejected: {0}")]
    Rejected(String),
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
