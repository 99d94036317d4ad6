//! Error types for the Vaulterp server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchRecord = 4,
    BadValue = 5,
    Duplicate = 6,
    MissingReference = 7,
    AlreadyDecided = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

// Postgres SQLSTATE values surfaced as client errors
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::Database(e) => {
                let sqlstate = e
                    .as_database_error()
                    .and_then(|db| db.code())
                    .map(|code| code.into_owned());
                match sqlstate.as_deref() {
                    Some(FOREIGN_KEY_VIOLATION) => {
                        tracing::warn!("Foreign key violation: {:?}", e);
                        (
                            StatusCode::BAD_REQUEST,
                            ErrorCode::MissingReference,
                            "Referenced record does not exist".to_string(),
                        )
                    }
                    Some(UNIQUE_VIOLATION) => {
                        tracing::warn!("Unique violation: {:?}", e);
                        (
                            StatusCode::CONFLICT,
                            ErrorCode::Duplicate,
                            "Record already exists".to_string(),
                        )
                    }
                    _ => {
                        tracing::error!("Database error: {:?}", e);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::DbFailure,
                            "Database error".to_string(),
                        )
                    }
                }
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::AlreadyDecided, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, code, message) = AppError::Validation("bad".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, ErrorCode::BadValue);
        assert_eq!(message, "bad");
    }

    #[test]
    fn test_database_error_hides_driver_text() {
        let (status, code, message) = AppError::Database(sqlx::Error::PoolTimedOut).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, ErrorCode::DbFailure);
        assert_eq!(message, "Database error");
    }

    #[test]
    fn test_conflict_and_not_found() {
        assert_eq!(AppError::Conflict("x".into()).parts().0, StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("x".into()).parts().0, StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Authentication("x".into()).parts().0,
            StatusCode::UNAUTHORIZED
        );
    }
}
