//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::openapi;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // `/pets/search` is a static segment, so it wins over `/pets/{id}`.
    let api_v1 = Router::new()
        .route("/pets", post(handlers::create_pet).get(handlers::get_pets))
        .route("/pets/search", post(handlers::search_pets))
        .route(
            "/pets/{id}",
            get(handlers::get_pet)
                .put(handlers::update_pet)
                .delete(handlers::delete_pet),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/swagger", get(|| async { Redirect::permanent("/swagger/") }))
        .route("/swagger/", get(openapi::swagger_ui))
        .route("/swagger/openapi.json", get(openapi::openapi_json))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(AppState::from_repository(Arc::new(LocalRepository::new())))
    }

    #[tokio::test]
    async fn test_health_is_empty_200() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_search_route_is_not_captured_by_id() {
        let response = router()
            .oneshot(
                Request::post("/v1/pets/search")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_swagger_ui_served() {
        let response = router()
            .oneshot(Request::get("/swagger/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/swagger/openapi.json"));

        let response = router()
            .oneshot(Request::get("/swagger").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_redirection());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = router()
            .oneshot(Request::get("/pets").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
