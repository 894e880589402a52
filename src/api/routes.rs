//! Admin Router
//!
//! Read-only HTTP surface for operators: liveness and administrator cache
//! counters. The bot itself never talks to it.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, stats_handler, AppState};

/// Builds the admin router over `state`.
///
/// Serves `GET /health` and `GET /stats`; every request is traced through
/// `tower_http` and CORS is open so a dashboard can poll it.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
