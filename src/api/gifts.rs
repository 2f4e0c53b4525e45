//! Gift API endpoints.
//!
//! Gifts use full-replace updates: a PUT must carry the complete record.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{json_body, parse_id};
use crate::db::GIFTS;
use crate::errors::{AppError, ErrorResponse};
use crate::models::{Gift, GiftCreated, GiftInput, GiftUpdated, MessageResponse};
use crate::AppState;

/// GET /gifts - List all gifts.
#[utoipa::path(
    get,
    path = "/gifts",
    responses(
        (status = 200, description = "Every gift in the collection", body = Vec<Gift>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Gifts"
)]
pub async fn list_gifts(State(state): State<AppState>) -> Result<Json<Vec<Gift>>, AppError> {
    let gifts = state
        .db
        .collection(GIFTS)
        .find(None)
        .await
        .map_err(|e| e.context("fetching gifts"))?;

    Ok(Json(gifts))
}

/// GET /gifts/:id - Get a single gift.
#[utoipa::path(
    get,
    path = "/gifts/{id}",
    params(("id" = String, Path, description = "Gift id")),
    responses(
        (status = 200, description = "Gift found", body = Gift),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Gift not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Gifts"
)]
pub async fn get_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Gift>, AppError> {
    let id = parse_id(&id, "Must use a valid gift id to find a gift.")?;

    state
        .db
        .collection(GIFTS)
        .find_one(id)
        .await
        .map_err(|e| e.context("fetching the gift"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Gift not found".to_string()))
}

/// POST /gifts - Create a new gift.
#[utoipa::path(
    post,
    path = "/gifts",
    request_body = GiftInput,
    responses(
        (status = 201, description = "Gift created", body = GiftCreated),
        (status = 412, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Gifts"
)]
pub async fn create_gift(
    State(state): State<AppState>,
    body: Result<Json<GiftInput>, JsonRejection>,
) -> Result<(StatusCode, Json<GiftCreated>), AppError> {
    let gift = json_body(body)?;

    let id = state
        .db
        .collection(GIFTS)
        .insert_one(&gift)
        .await
        .map_err(|e| e.context("creating the gift"))?;

    tracing::info!(%id, name = %gift.name, "Gift created");

    Ok((
        StatusCode::CREATED,
        Json(GiftCreated {
            message: "Gift created successfully".to_string(),
            gift_id: id.to_string(),
        }),
    ))
}

/// PUT /gifts/:id - Replace a gift.
///
/// A replacement identical to the stored gift modifies nothing and is
/// reported as not found, the same as an unknown id.
#[utoipa::path(
    put,
    path = "/gifts/{id}",
    params(("id" = String, Path, description = "Gift id")),
    request_body = GiftInput,
    responses(
        (status = 200, description = "Gift replaced", body = GiftUpdated),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Gift not found or nothing was updated", body = ErrorResponse),
        (status = 412, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Gifts"
)]
pub async fn update_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GiftInput>, JsonRejection>,
) -> Result<Json<GiftUpdated>, AppError> {
    let id = parse_id(&id, "Must use a valid gift id to update gift.")?;
    let gift = json_body(body)?;

    let outcome = state
        .db
        .collection(GIFTS)
        .replace_one(id, &gift)
        .await
        .map_err(|e| e.context("updating the gift"))?;

    if outcome.modified == 0 {
        return Err(AppError::NotFound(
            "Gift not found or nothing was updated.".to_string(),
        ));
    }

    Ok(Json(GiftUpdated {
        message: "Gift was successfully updated.".to_string(),
        updated_id: id.to_string(),
    }))
}

/// DELETE /gifts/:id - Delete a gift.
#[utoipa::path(
    delete,
    path = "/gifts/{id}",
    params(("id" = String, Path, description = "Gift id")),
    responses(
        (status = 200, description = "Gift deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Gift not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Gifts"
)]
pub async fn delete_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id, "Must use a valid gift id to delete a gift.")?;

    let deleted = state
        .db
        .collection(GIFTS)
        .delete_one(id)
        .await
        .map_err(|e| e.context("deleting the gift"))?;

    if deleted == 0 {
        return Err(AppError::NotFound("Gift not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Gift deleted successfully!")))
}
