//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{delete, get, post, put},
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
    // CORS configuration - permissive for development, should be restricted
    // in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Availability
        .route(
            "/professionals/{professional_id}/available-slots",
            get(handlers::get_available_slots),
        )
        // Weekly schedule
        .route(
            "/professionals/{professional_id}/schedule",
            get(handlers::get_weekly_schedule),
        )
        .route(
            "/professionals/{professional_id}/schedule",
            put(handlers::save_weekly_schedule),
        )
        // Blocks
        .route(
            "/professionals/{professional_id}/blocks",
            get(handlers::list_blocks),
        )
        .route(
            "/professionals/{professional_id}/blocks",
            post(handlers::create_block),
        )
        .route("/blocks/{block_id}", delete(handlers::delete_block));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
