//! API route definitions

use crate::api::handlers;
use crate::app::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Create the main API router
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Liveness and health endpoints
        .route("/", get(handlers::ping))
        .route("/healthz", get(handlers::health_check))

        // Account endpoints
        .route("/accounts", post(handlers::create_account))
        .route(
            "/accounts/:id",
            get(handlers::get_account).delete(handlers::delete_account),
        )
}
