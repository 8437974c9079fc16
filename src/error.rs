//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! handle and represent the various error conditions that can occur, from
//! database issues to validation failures and malformed uploads.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into HTTP responses with JSON bodies. It also
//! provides `From` trait implementations for common error types like
//! `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error`,
//! `bcrypt::BcryptError`, `actix_multipart::MultipartError` and
//! `std::io::Error`, allowing for easy conversion using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific type of error, carrying a message
/// detailing the issue. These errors are then converted into appropriate HTTP
/// responses.
#[derive(Debug)]
pub enum AppError {
    /// Represents an unauthorized access attempt (HTTP 401).
    /// Typically used when authentication fails or is required but missing.
    Unauthorized(String),
    /// Represents an authenticated caller lacking the required role (HTTP 403).
    Forbidden(String),
    /// Represents a client-side error due to a malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// Represents a request conflicting with existing state, such as a
    /// registration against an email that is already taken (HTTP 409).
    Conflict(String),
    /// Represents an unexpected server-side error (HTTP 500).
    /// This can be used for generic internal errors not covered by more specific types.
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// Represents an error due to failed input validation (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    ValidationError(String),
}

impl AppError {
    fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg)
            | AppError::ValidationError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// `status_code` is implemented explicitly (rather than relying on the
/// default) so middleware observing failed requests sees the real status.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            // Database errors are presented as generic internal server errors.
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Specific cases like `sqlx::Error::RowNotFound` are mapped to `AppError::NotFound`,
/// while other database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// This is typically used when JWT processing (e.g., verification) fails.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Converts `actix_multipart::MultipartError` into `AppError::BadRequest`.
///
/// Raised while streaming a malformed `multipart/form-data` upload.
impl From<actix_multipart::MultipartError> for AppError {
    fn from(error: actix_multipart::MultipartError) -> AppError {
        AppError::BadRequest(format!("Invalid multipart payload: {}", error))
    }
}

/// Converts `std::io::Error` into `AppError::InternalServerError`.
///
/// Raised when persisting an uploaded file fails.
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        // Test Unauthorized
        let error = AppError::Unauthorized("Invalid token".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        // Test Forbidden
        let error = AppError::Forbidden("Administrator access required".into());
        let response = error.error_response();
        assert_eq!(response.status(), 403);

        // Test BadRequest
        let error = AppError::BadRequest("Invalid input".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        // Test NotFound
        let error = AppError::NotFound("Resource not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        // Test Conflict
        let error = AppError::Conflict("Email already registered".into());
        let response = error.error_response();
        assert_eq!(response.status(), 409);

        // Test ValidationError
        let error = AppError::ValidationError("bad field".into());
        let response = error.error_response();
        assert_eq!(response.status(), 422);

        // Test InternalServerError
        let error = AppError::InternalServerError("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_status_code_matches_response() {
        let error = AppError::Conflict("dup".into());
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.error_response().status(), error.status_code());
    }
}
