//!
//! # Request Validation
//!
//! Request DTOs derive `validator::Validate`; handlers call [`validate`]
//! explicitly instead of relying on framework hooks. Every violation across
//! every field is collected into one comma-joined, human-readable message so
//! a client sees all problems at once.

use actix_web::web;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// Validates `input`, turning any violations into a single `BadRequest`.
pub fn validate<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|errors| AppError::BadRequest(aggregate_violations(&errors)))
}

/// Flattens `ValidationErrors` into `"<violation>, <violation>, ..."`.
///
/// Each entry uses the constraint's message when one is set, otherwise a
/// generic `<field>: <code>` fallback.
pub fn aggregate_violations(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| {
                match &violation.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, violation.code),
                }
            })
        })
        .collect();
    // field_errors() is a HashMap; sort for a stable message.
    messages.sort();
    messages.join(", ")
}

/// Routes malformed JSON bodies through the standard error envelope
/// instead of the framework's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Same treatment for path parameters that fail to parse.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Same treatment for query strings.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
