//! VoxCare HTTP presentation layer
//!
//! This crate provides the HTTP API for VoxCare: chat with spoken
//! replies, text-to-speech and speech-to-text endpoints.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ServerConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
