//! Holiday Party Planner Backend
//!
//! A REST backend for gifts and dishes, persisted in a SQLite-backed document store.

mod api;
mod config;
mod db;
mod errors;
mod middleware;
mod models;
mod openapi;
mod validation;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    middleware::from_fn,
    response::{Html, IntoResponse},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{Database, SqliteStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Holiday Party Planner Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // The store must be reachable before we accept any connection
    let pool = match db::init_database(&config.db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };
    let db = Database::new(Arc::new(SqliteStore::new(pool)));

    let state = AppState { db };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("z-key"),
            header::AUTHORIZATION,
        ]);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .merge(gift_routes())
        .merge(food_routes())
        .merge(openapi::routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Gift routes. Create and replace are guarded by the gift validator.
fn gift_routes() -> Router<AppState> {
    Router::new()
        .route("/gifts", get(api::list_gifts))
        .route(
            "/gifts",
            post(api::create_gift).layer(from_fn(middleware::save_gift)),
        )
        .route("/gifts/{id}", get(api::get_gift))
        .route(
            "/gifts/{id}",
            put(api::update_gift).layer(from_fn(middleware::save_gift)),
        )
        .route("/gifts/{id}", delete(api::delete_gift))
}

/// Food routes. The filter routes are static segments and win over `{dishId}`.
fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/food/dish", get(api::list_dishes))
        .route(
            "/food/dish",
            post(api::create_dish).layer(from_fn(middleware::save_dish)),
        )
        .route(
            "/food/dish/by-category/{categoryId}",
            get(api::dishes_by_category),
        )
        .route(
            "/food/dish/by-participant/{participantId}",
            get(api::dishes_by_participant),
        )
        .route("/food/dish/{dishId}", get(api::get_dish))
        .route(
            "/food/dish/{dishId}",
            put(api::update_dish).layer(from_fn(middleware::update_dish)),
        )
        .route("/food/dish/{dishId}", delete(api::delete_dish))
}

/// Landing page.
async fn home() -> Html<&'static str> {
    Html(
        r#"<h1>Welcome to the Holiday Party Planner</h1>
<p>Click a link below to view the different routes:</p>
<ul>
  <li><a href="/gifts">Gifts Collection</a></li>
  <li><a href="/food/dish">Food / Dishes Collection</a></li>
  <li><a href="/api-docs">API Documentation</a></li>
</ul>"#,
    )
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(
            r#"<h1>Where did it go?!</h1>
<p>Seems like this page doesn't exist...</p>
<a href="/">Go Back</a>"#,
        ),
    )
}
