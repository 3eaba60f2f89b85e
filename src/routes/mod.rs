// src/routes/mod.rs
pub mod assistant;

use crate::state::SharedState;
use assistant::assistant_handler;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/ai-assistant", post(assistant_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        // Browser dashboard calls this cross-origin; preflights are answered here.
        .layer(CorsLayer::permissive())
}
