//! REST API module.
//!
//! Each handler performs exactly one store operation. Bodies have already
//! passed the validation middleware by the time a handler runs.

mod dishes;
mod gifts;

pub use dishes::*;
pub use gifts::*;

use axum::{extract::rejection::JsonRejection, Json};

use crate::db::RecordId;
use crate::errors::AppError;

/// Parse a path identifier, rejecting malformed ids before any store access.
fn parse_id(raw: &str, message: &str) -> Result<RecordId, AppError> {
    raw.parse().map_err(|_| {
        tracing::debug!(id = raw, "Rejected malformed id");
        AppError::MalformedId(message.to_string())
    })
}

/// Unwrap a JSON body, turning extractor rejections into our error envelope.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
