//! Error handling module for the party planner backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validation::ValidationErrors;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_ID: &str = "INVALID_ID";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const STORE_ERROR: &str = "STORE_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// One or more field constraints were violated
    Validation(ValidationErrors),
    /// Identifier does not match the store's id format
    MalformedId(String),
    /// Request could not be used as sent
    BadRequest(String),
    /// Well-formed id or filter matched nothing
    NotFound(String),
    /// Unexpected failure talking to the document store
    Store(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::PRECONDITION_FAILED,
            AppError::MalformedId(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::MalformedId(_) => codes::INVALID_ID,
            AppError::BadRequest(_) => codes::BAD_REQUEST,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Store(_) => codes::STORE_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::MalformedId(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Store(msg) => msg.clone(),
        }
    }

    /// Replace a store fault with a generic message naming the failed operation.
    ///
    /// The underlying cause is logged here; it never reaches the client.
    /// Client errors pass through untouched.
    pub fn context(self, operation: &str) -> Self {
        match self {
            AppError::Store(cause) => {
                tracing::error!(cause = %cause, "Error {}", operation);
                AppError::Store(format!("Server error while {}", operation))
            }
            other => other,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

// Store conversions keep the cause but do not log it; `context` logs it once
// together with the operation that failed.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Store(format!("Document encoding error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    /// Field name to messages, present for validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        let details = match error {
            AppError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                details,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
