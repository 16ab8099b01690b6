use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route(
            "/catalog",
            get(handlers::get_catalog).put(handlers::switch_catalog),
        )
        .route("/titles/search", get(handlers::search))
        // Recommendations
        .route("/recommend", post(handlers::recommend))
        .route("/recommend/ratings", post(handlers::recommend_from_ratings))
        .route("/recommend/hybrid", post(handlers::recommend_hybrid))
        .layer(
            // Request id is assigned before the trace span is created
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
