//! API Routes
//!
//! Configures the Axum router with all semantic cache endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, message_handler, reset_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /message` - `searchCache` / `cachePrompt` messages
/// - `GET /stats` - Cache statistics
/// - `DELETE /cache` - Remove every cached entry
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so a browser extension can call the server
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/message", post(message_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(reset_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
