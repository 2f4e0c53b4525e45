//! Gift model. Gifts are always written as a complete record.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// A stored gift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Gift {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Number,
    pub department: String,
    pub brand: String,
    #[schema(value_type = f64)]
    pub quantity: Number,
    pub color: String,
    pub size: String,
    pub store: String,
}

/// Request body for creating or replacing a gift.
///
/// Keys outside the gift schema are ignored. Numbers are kept as the literal
/// the client sent, so `25` is stored and returned as `25`, not `25.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GiftInput {
    pub name: String,
    #[schema(value_type = f64)]
    pub price: Number,
    pub department: String,
    pub brand: String,
    #[schema(value_type = f64)]
    pub quantity: Number,
    pub color: String,
    pub size: String,
    pub store: String,
}

/// Body returned after a gift is created.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiftCreated {
    pub message: String,
    pub gift_id: String,
}

/// Body returned after a gift is replaced.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiftUpdated {
    pub message: String,
    pub updated_id: String,
}
