//! Standard response bodies
//!
//! The dashboard frontend consumes flat JSON shapes, so there is no
//! success envelope; errors are always `{"error": "..."}` and
//! confirmation-only operations return `{"message": "..."}`.

use serde::{Deserialize, Serialize};

/// Error body for 4xx/5xx responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Confirmation body for operations with no data payload
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
