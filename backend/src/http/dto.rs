//! Data Transfer Objects for the HTTP API.
//!
//! Every response body is an envelope: `{"data": ...}` on success and
//! `{"error": {"code": ..., "message": ...}}` on failure. Request bodies are
//! the model types themselves, re-exported here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::models::{CreatePet, Pet, PetFields, PetId, SearchPets, UpdatePet};

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ApiError,
}

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
