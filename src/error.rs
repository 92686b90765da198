// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! Contract errors (bad input, unknown user) are reported as HTTP 200
//! responses whose body carries an `error` field; callers inspect the
//! body, not the status code. Store failures are the exception and map
//! to HTTP 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No user input")]
    NoUserInput,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("description or duration missing")]
    MissingExerciseFields,

    #[error("Invalid date")]
    InvalidDate,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            // Contract errors keep the success status; only the body
            // distinguishes them from a normal response.
            other => (StatusCode::OK, other.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_errors_use_success_status() {
        for err in [
            AppError::NoUserInput,
            AppError::UserAlreadyExists,
            AppError::UserNotFound,
            AppError::MissingExerciseFields,
            AppError::InvalidDate,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::OK);
        }
    }

    #[test]
    fn test_store_errors_use_server_error_status() {
        let response = AppError::Database("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
