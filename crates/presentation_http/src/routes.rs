//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Welcome and health endpoints
        .route("/", get(handlers::health::welcome))
        .route("/health", get(handlers::health::health_check))
        // Chat API (completion + spoken reply)
        .route("/api/chat", post(handlers::chat::chat))
        // Speech API
        .route("/api/tts", post(handlers::speech::synthesize))
        .route("/api/stt", post(handlers::speech::transcribe))
        // Attach state
        .with_state(state)
}
