use super::handlers::{self, AppState};
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Wind REST API endpoints
        .route("/api/v1/wind/{zip_code}", get(handlers::wind))
        .route("/api/v1/wind/cache", delete(handlers::clear_wind_cache))
        // Cache observability
        .route("/api/v1/cache/stats", get(handlers::cache_stats))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
