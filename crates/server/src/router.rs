//! # API Router
//!
//! Defines the Axum router, mapping URL paths to their handlers.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    generate_handler, health_handler, keywords_handler, root_handler, suggest_handler,
    webhook_receive_handler, webhook_verify_handler,
};
use crate::state::AppState;

/// Creates the application router with all routes and shared state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .route("/keywords", post(keywords_handler))
        .route("/suggest", post(suggest_handler))
        .route(
            "/webhook",
            get(webhook_verify_handler).post(webhook_receive_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
