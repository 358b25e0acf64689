//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// PostgreSQL SQLSTATE for a foreign key violation
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL SQLSTATE for a check constraint violation
const PG_CHECK_VIOLATION: &str = "23514";

/// Numeric error codes returned in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 2,
    NoSuchData = 3,
    BadValue = 4,
    ConcurrentModification = 5,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Rejected input, carrying the submitted state so it can be re-presented
    #[error("Validation error: {message}")]
    InvalidEntity {
        message: String,
        submitted: serde_json::Value,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Wrap a validation failure together with the rejected payload
    pub fn invalid<T: Serialize>(message: impl Into<String>, submitted: &T) -> Self {
        AppError::InvalidEntity {
            message: message.into(),
            submitted: serde_json::to_value(submitted).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Map constraint violations raised by the store to validation errors
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.code().as_deref() {
                Some(PG_FOREIGN_KEY_VIOLATION) => {
                    return AppError::Validation(format!(
                        "Referenced record does not exist ({})",
                        db.constraint().unwrap_or("foreign key")
                    ));
                }
                Some(PG_CHECK_VIOLATION) => {
                    return AppError::Validation(format!(
                        "Value rejected by constraint {}",
                        db.constraint().unwrap_or("check")
                    ));
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Submitted payload, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg, None),
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::BadValue, msg, None)
            }
            AppError::InvalidEntity { message, submitted } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::BadValue,
                message,
                Some(submitted),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg, None),
            AppError::Conflict(msg) => {
                tracing::error!("Concurrency conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorCode::ConcurrentModification,
                    msg,
                    None,
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
