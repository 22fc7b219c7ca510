//! Custom error types for the itinerary service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the itinerary service
///
/// Every error is terminal for the current request and surfaced to the
/// caller as-is; nothing here is retried or swallowed.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Registration or profile update collides with an existing username
    #[error("Username is already taken")]
    DuplicateUsername,

    /// Registration collides with an existing email address
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Unknown username or password mismatch on login
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Lookup miss for a user, itinerary, or activity
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Field length or format violation, detected before any storage call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Internal server error
    #[error("Internal server error")]
    Internal,
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(common::error::DatabaseError::Query(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::DuplicateUsername | ApiError::DuplicateEmail => {
                (StatusCode::CONFLICT, self.to_string())
            }
            ApiError::InvalidCredentials | ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
