//! Error types for the semantic cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the semantic cache.
///
/// Empty caches and missed lookups are not errors; they surface as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The embedding producer could not be reached, failed, timed out,
    /// or returned a vector unusable for similarity (zero or non-finite).
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// A vector's dimension differs from the one it is compared against
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Reading or writing the persisted cache record failed
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Shorthand for wrapping any displayable error as a persistence failure.
    pub fn persistence(err: impl std::fmt::Display) -> Self {
        CacheError::PersistenceFailure(err.to_string())
    }

    /// Shorthand for wrapping any displayable error as an embedding failure.
    pub fn embedding(err: impl std::fmt::Display) -> Self {
        CacheError::EmbeddingUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::EmbeddingUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::DimensionMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the semantic cache.
pub type Result<T> = std::result::Result<T, CacheError>;
