//!
//! # Error Handling
//!
//! Defines the application-wide error type `AppError`. Every failure a
//! service or handler can produce maps onto one of its variants, each
//! carrying an HTTP status and a client-facing message.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so handlers can
//! return `Result<_, AppError>` and failures become the JSON error envelope
//! `{success: false, status, message}` automatically. `From` impls for
//! `sqlx::Error`, `validator::ValidationErrors`, `jsonwebtoken::errors::Error`,
//! `bcrypt::BcryptError`, and `actix_web::error::BlockingError` let services
//! propagate with `?`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::validation::aggregate_violations;

/// All failure modes exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Request body failed shape or constraint validation (HTTP 400).
    BadRequest(String),
    /// Missing/invalid/expired token, or invalid login credentials (HTTP 401).
    Unauthorized(String),
    /// Referenced user/task does not exist or is soft-deleted (HTTP 404).
    NotFound(String),
    /// Signup email already registered (HTTP 409).
    Conflict(String),
    /// Unclassified failure such as an unreachable store (HTTP 500).
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(json!({
            "success": false,
            "status": self.status().as_u16(),
            "message": self.message(),
        }))
    }
}

/// `RowNotFound` maps to `NotFound`; anything else is a store-level failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Internal(error.to_string()),
        }
    }
}

/// All violations are aggregated into a single comma-joined message.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        AppError::BadRequest(aggregate_violations(&errors))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized("Invalid authentication token".into())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

/// A cancelled blocking task (bcrypt runs on the blocking pool).
impl From<actix_web::error::BlockingError> for AppError {
    fn from(error: actix_web::error::BlockingError) -> AppError {
        AppError::Internal(error.to_string())
    }
}
