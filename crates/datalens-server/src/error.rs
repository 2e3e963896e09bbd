//! Server-wide error types and HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;

/// Result type alias for server operations
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error taxonomy
///
/// Validation errors surface as 400 with the detection message; not-found as
/// 404; everything else as 500 with a generic message (internal detail goes
/// to the log, never the client).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error with resource context
    pub fn not_found(resource: &str, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} '{}' not found", resource, identifier))
    }
}

impl From<datalens_common::Error> for AppError {
    fn from(err: datalens_common::Error) -> Self {
        match err {
            datalens_common::Error::Parse(msg) => AppError::Validation(msg),
            datalens_common::Error::Io(e) => AppError::Io(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Database(ref e) => {
                tracing::error!(error = ?e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during processing".to_string(),
                )
            },
            AppError::Io(ref e) => {
                tracing::error!(error = ?e, "IO error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during processing".to_string(),
                )
            },
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error during processing".to_string(),
                )
            },
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::validation("bad input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::not_found("Dataset", "abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = AppError::Internal("connection string was postgres://secret".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_message_names_resource() {
        let err = AppError::not_found("Dataset", "1234");
        assert_eq!(err.to_string(), "Dataset '1234' not found");
    }
}
