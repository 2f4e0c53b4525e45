//! Data models for the Holiday Party Planner.
//!
//! Field names match the JSON the frontend sends and receives.

mod dish;
mod gift;

pub use dish::*;
pub use gift::*;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain confirmation body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
