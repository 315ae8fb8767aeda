//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Body missing or not decodable as the expected JSON (400)
    InvalidBody { reason: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::InvalidBody { reason } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": reason
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": e.to_string()
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody {
            reason: rejection.body_text(),
        }
    }
}
