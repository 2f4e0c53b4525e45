//! Request validation middleware.
//!
//! Each guard buffers the JSON body, runs a rule set over it and either
//! short-circuits with a 412 or hands the untouched body on to the handler.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::errors::AppError;
use crate::validation::{dish_rules, dish_update_rules, gift_rules, RuleSet};

/// Largest request body the validators will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Validate a gift body before create or replace.
pub async fn save_gift(request: Request, next: Next) -> Response {
    validate_body(&gift_rules(), request, next).await
}

/// Validate a dish body before create.
pub async fn save_dish(request: Request, next: Next) -> Response {
    validate_body(&dish_rules(), request, next).await
}

/// Validate a partial dish body before update.
pub async fn update_dish(request: Request, next: Next) -> Response {
    validate_body(&dish_update_rules(), request, next).await
}

async fn validate_body(rules: &RuleSet, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read request body: {}", e);
            return AppError::BadRequest("Request body could not be read".to_string())
                .into_response();
        }
    };

    let input: Value = if bytes.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                return AppError::BadRequest(format!("Malformed JSON body: {}", e))
                    .into_response()
            }
        }
    };

    if let Err(errors) = rules.validate(&input) {
        tracing::debug!(path = %parts.uri.path(), fields = errors.len(), "Validation failed");
        return AppError::Validation(errors).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{header, StatusCode},
        middleware,
        routing::post,
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/gifts",
                post(|body: String| async move { body }).layer(middleware::from_fn(save_gift)),
            )
            .route(
                "/dish",
                post(|| async { "created" }).layer(middleware::from_fn(save_dish)),
            )
            .route(
                "/dish/update",
                post(|| async { "updated" }).layer(middleware::from_fn(update_dish)),
            )
    }

    fn json_request(uri: &str, body: &str) -> Request {
        axum::http::Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler_unchanged() {
        let payload = json!({
            "name": "Scarf",
            "price": 25,
            "department": "Clothing",
            "brand": "Acme",
            "quantity": 1,
            "color": "red",
            "size": "M",
            "store": "Target"
        })
        .to_string();

        let response = app().oneshot(json_request("/gifts", &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes, payload.as_bytes());
    }

    #[tokio::test]
    async fn test_invalid_body_short_circuits_with_412() {
        let response = app()
            .oneshot(json_request("/gifts", r#"{"name": "Scarf", "price": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let details = body["error"]["details"].as_object().unwrap();
        for field in ["price", "department", "brand", "quantity", "color", "size", "store"] {
            assert!(details.contains_key(field), "missing {}", field);
        }
        assert!(!details.contains_key("name"));
    }

    #[tokio::test]
    async fn test_empty_body_reports_required_fields() {
        let response = app().oneshot(json_request("/dish", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);

        let body = body_json(response).await;
        assert!(body["error"]["details"]["name"].is_array());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = app().oneshot(json_request("/dish", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_update_rules_allow_partial_body() {
        let response = app()
            .oneshot(json_request("/dish/update", r#"{"serves": 8}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app()
            .oneshot(json_request("/dish/update", r#"{"serves": "eight"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
    }
}
