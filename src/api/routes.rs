//! API Routes
//!
//! Configures the Axum router with all identity cache endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, load_handler, remove_handler, stats_handler, store_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /identity/:domain` - Store an identity record
/// - `GET /identity/:domain/*username` - Load an identity record
/// - `DELETE /identity/:domain/*username` - Remove an identity record
/// - `GET /stats` - Identity cache statistics
/// - `GET /health` - Health check endpoint
///
/// The username segment is a wildcard, so domain-qualified names such as
/// `PRIMARY/alice` can be addressed as-is.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/identity/:domain", put(store_handler))
        .route(
            "/identity/:domain/*username",
            get(load_handler).delete(remove_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
