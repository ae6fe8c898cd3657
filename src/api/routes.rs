//! API route definitions

use super::handlers::{self, ApiState};
use super::tune_in_handlers;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Param names must match per segment position, hence user_id/target_id
    // everywhere. Static segments win over params.
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // ====================================================================
        // Tune-in relationships
        // ====================================================================
        .route(
            "/tune-in/counts/{user_id}",
            get(tune_in_handlers::get_counts),
        )
        .route(
            "/tune-in/{user_id}/followers",
            get(tune_in_handlers::list_followers),
        )
        .route(
            "/tune-in/{user_id}/following",
            get(tune_in_handlers::list_following),
        )
        .route(
            "/tune-in/{user_id}/following/{target_id}",
            get(tune_in_handlers::is_following),
        )
        .route(
            "/tune-in/{user_id}/{target_id}",
            post(tune_in_handlers::create_tune_in).delete(tune_in_handlers::remove_tune_in),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
