//! Dish API endpoints under `/food`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::{json_body, parse_id};
use crate::db::{FieldFilter, DISHES};
use crate::errors::{AppError, ErrorResponse};
use crate::models::{CreateDishRequest, Dish, MessageResponse, NewDish, UpdateDishRequest};
use crate::AppState;

const INVALID_DISH_ID: &str = "Invalid dish id";
const DISH_NOT_FOUND: &str = "Dish not found";

/// POST /food/dish - Create a new dish.
#[utoipa::path(
    post,
    path = "/food/dish",
    request_body = CreateDishRequest,
    responses(
        (status = 201, description = "Dish created", body = Dish),
        (status = 400, description = "Dish name is required", body = ErrorResponse),
        (status = 412, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn create_dish(
    State(state): State<AppState>,
    body: Result<Json<CreateDishRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Dish>), AppError> {
    let request = json_body(body)?;

    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("Dish name is required".to_string()));
    }

    let dish = NewDish::new(request, Utc::now());
    let id = state
        .db
        .collection(DISHES)
        .insert_one(&dish)
        .await
        .map_err(|e| e.context("creating dish"))?;

    tracing::info!(%id, name = %dish.name, "Dish created");

    Ok((StatusCode::CREATED, Json(dish.with_id(id.to_string()))))
}

/// PUT /food/dish/:dishId - Merge the supplied fields into a dish.
#[utoipa::path(
    put,
    path = "/food/dish/{dishId}",
    params(("dishId" = String, Path, description = "Dish id")),
    request_body = UpdateDishRequest,
    responses(
        (status = 200, description = "Dish after the update", body = Dish),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse),
        (status = 412, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn update_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
    body: Result<Json<UpdateDishRequest>, JsonRejection>,
) -> Result<Json<Dish>, AppError> {
    let id = parse_id(&dish_id, INVALID_DISH_ID)?;
    let set = json_body(body)?.into_set(Utc::now())?;

    state
        .db
        .collection(DISHES)
        .find_one_and_update(id, set)
        .await
        .map_err(|e| e.context("updating dish"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(DISH_NOT_FOUND.to_string()))
}

/// GET /food/dish - List all dishes.
#[utoipa::path(
    get,
    path = "/food/dish",
    responses(
        (status = 200, description = "Every dish in the collection", body = Vec<Dish>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn list_dishes(State(state): State<AppState>) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = state
        .db
        .collection(DISHES)
        .find(None)
        .await
        .map_err(|e| e.context("fetching dishes"))?;

    Ok(Json(dishes))
}

/// GET /food/dish/:dishId - Get a single dish.
#[utoipa::path(
    get,
    path = "/food/dish/{dishId}",
    params(("dishId" = String, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish found", body = Dish),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
) -> Result<Json<Dish>, AppError> {
    let id = parse_id(&dish_id, INVALID_DISH_ID)?;

    state
        .db
        .collection(DISHES)
        .find_one(id)
        .await
        .map_err(|e| e.context("fetching dish"))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(DISH_NOT_FOUND.to_string()))
}

/// GET /food/dish/by-category/:categoryId - Dishes with this category.
#[utoipa::path(
    get,
    path = "/food/dish/by-category/{categoryId}",
    params(("categoryId" = String, Path, description = "Category tag, e.g. main, side, dessert")),
    responses(
        (status = 200, description = "Matching dishes, possibly none", body = Vec<Dish>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn dishes_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = state
        .db
        .collection(DISHES)
        .find(Some(FieldFilter::eq("categoryId", &category_id)))
        .await
        .map_err(|e| e.context("fetching dishes by category"))?;

    Ok(Json(dishes))
}

/// GET /food/dish/by-participant/:participantId - Dishes a participant brings.
#[utoipa::path(
    get,
    path = "/food/dish/by-participant/{participantId}",
    params(("participantId" = String, Path, description = "Participant id")),
    responses(
        (status = 200, description = "Matching dishes, possibly none", body = Vec<Dish>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn dishes_by_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<String>,
) -> Result<Json<Vec<Dish>>, AppError> {
    let dishes = state
        .db
        .collection(DISHES)
        .find(Some(FieldFilter::eq("participantId", &participant_id)))
        .await
        .map_err(|e| e.context("fetching dishes by participant"))?;

    Ok(Json(dishes))
}

/// DELETE /food/dish/:dishId - Delete a dish.
#[utoipa::path(
    delete,
    path = "/food/dish/{dishId}",
    params(("dishId" = String, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    ),
    tag = "Food"
)]
pub async fn delete_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&dish_id, INVALID_DISH_ID)?;

    let deleted = state
        .db
        .collection(DISHES)
        .delete_one(id)
        .await
        .map_err(|e| e.context("deleting dish"))?;

    if deleted == 0 {
        return Err(AppError::NotFound(DISH_NOT_FOUND.to_string()));
    }

    Ok(Json(MessageResponse::new("Dish deleted successfully")))
}
