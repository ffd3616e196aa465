//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let estates = Router::new()
        .route("/", post(handlers::create_estate))
        .route("/{estate_id}/tree", post(handlers::create_tree))
        .route("/{estate_id}/stats", get(handlers::get_estate_stats))
        .route("/{estate_id}/drone-plan", get(handlers::get_drone_plan));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/estate", estates)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
