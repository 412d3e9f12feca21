//! # Autofill HTTP Surface
//!
//! Axum router wiring the cache facade and the completion requester into the
//! `/api/suggest` and `/api/validate` endpoints (with their legacy aliases).

pub mod config;
pub mod errors;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use errors::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index_handler))
        .route("/health", get(routes::health_handler))
        .route("/api/suggest", post(routes::suggest_handler))
        // Legacy alias kept for older editor builds.
        .route("/api/complete", post(routes::suggest_handler))
        .route("/api/validate", post(routes::validate_handler))
        .route("/api/feedback", post(routes::validate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
