//! Error type for the web service and its JSON response formatting

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use footprint::ValidationError;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Message returned for any failed login, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";

#[derive(Error, Debug)]
pub enum AppError {
    /// Calculator fields missing or not numeric
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Registration with a taken username
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    /// Unknown user or wrong password
    #[error("Authentication failed")]
    Authentication,

    /// Too many failed logins for one username
    #[error("Too many login attempts")]
    TooManyAttempts,

    /// No valid session on a protected route
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed request with a user-facing message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// Session store, token or hashing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    /// Form the client should return to
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<&'static str>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateUser(_) => StatusCode::CONFLICT,
            AppError::Authentication | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::DuplicateUser(_) => "DUPLICATE_USER",
            AppError::Authentication => "AUTHENTICATION_FAILED",
            AppError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the user; never leaks internals
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.user_message().to_string(),
            AppError::DuplicateUser(_) => "Username already exists.".to_string(),
            AppError::Authentication => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::TooManyAttempts => {
                "Too many login attempts. Please try again later.".to_string()
            }
            AppError::Unauthorized => "Please log in to access this page.".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Storage(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn form(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(_) => Some("/calculator"),
            AppError::DuplicateUser(_) => Some("/register"),
            AppError::Authentication | AppError::TooManyAttempts | AppError::Unauthorized => {
                Some("/login")
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(status = %status.as_u16(), code = self.code(), error = %self, "server error response");
        } else {
            debug!(status = %status.as_u16(), code = self.code(), error = %self, "client error response");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.user_message(),
                form: self.form(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_unprocessable() {
        let err = AppError::from(ValidationError::Missing("distance"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.user_message(), "Invalid input. Please enter valid numbers.");
        assert_eq!(err.form(), Some("/calculator"));
    }

    #[test]
    fn test_authentication_message_is_generic() {
        let err = AppError::Authentication;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.user_message(), INVALID_CREDENTIALS_MESSAGE);
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err = AppError::from(DatabaseError::Configuration("secret dsn".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("secret"));
    }

    #[test]
    fn test_duplicate_user_conflict() {
        let err = AppError::DuplicateUser("alice".to_string());
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "DUPLICATE_USER");
    }
}
