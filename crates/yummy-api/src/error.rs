//! API error handling
//!
//! Every failure a handler can produce is converted into an `AppError`
//! before it crosses the handler boundary; the response body is always
//! JSON of the shape `{"message": ...}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use yummy_core::YummyError;

/// API error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    ValidationFailed(String),
    Conflict(String),
    NotFound(String),
    Unauthenticated(String),
    Database(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::ValidationFailed(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new(msg)),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ApiError::new(format!("{resource} not found")),
            ),
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, ApiError::new(msg)),
            AppError::Database(msg) => {
                // Internal detail goes to the log, never to the client
                tracing::error!("database error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("Internal server error"),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<YummyError> for AppError {
    fn from(err: YummyError) -> Self {
        match err {
            YummyError::NotFound(resource) => AppError::NotFound(resource),
            YummyError::Conflict(msg) => AppError::Conflict(msg),
            YummyError::ValidationFailed(msg) => AppError::ValidationFailed(msg),
            YummyError::Unauthenticated(msg) => AppError::Unauthenticated(msg),
            YummyError::DatabaseError(msg) => AppError::Database(msg),
            YummyError::ConfigError(msg) => AppError::Internal(msg),
            YummyError::Other(err) => AppError::Internal(err.to_string()),
        }
    }
}

/// True when the database rejected a statement on a unique constraint
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
