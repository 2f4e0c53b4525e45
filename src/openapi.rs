//! Machine-readable API description.
//!
//! Swagger UI is served at `/api-docs` and the raw document at
//! `/api-docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::AppState;

/// Assembled OpenAPI document for every resource route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Holiday Party Manager",
        description = "A simple API to help manage holiday parties: gifts to buy and dishes to bring."
    ),
    paths(
        crate::api::list_gifts,
        crate::api::get_gift,
        crate::api::create_gift,
        crate::api::update_gift,
        crate::api::delete_gift,
        crate::api::create_dish,
        crate::api::update_dish,
        crate::api::list_dishes,
        crate::api::get_dish,
        crate::api::dishes_by_category,
        crate::api::dishes_by_participant,
        crate::api::delete_dish,
    ),
    components(schemas(
        crate::models::Gift,
        crate::models::GiftInput,
        crate::models::GiftCreated,
        crate::models::GiftUpdated,
        crate::models::Dish,
        crate::models::CreateDishRequest,
        crate::models::UpdateDishRequest,
        crate::models::MessageResponse,
        crate::errors::ErrorResponse,
        crate::errors::ErrorDetails,
    )),
    tags(
        (name = "Gifts", description = "Gifts to buy for the party"),
        (name = "Food", description = "Dishes participants bring"),
    )
)]
pub struct ApiDoc;

/// Routes serving the browsable UI and the generated document.
pub fn routes() -> Router<AppState> {
    Router::new().merge(
        SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
}
