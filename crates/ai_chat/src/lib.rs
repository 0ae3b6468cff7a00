//! AI Chat - chat-completion adapter
//!
//! Relays conversations to a hosted, OpenAI-compatible chat-completion
//! API (Groq) and returns the generated text.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the `ChatCompletion` trait (port)
//! - `groq` module contains the concrete REST adapter
//!
//! # Example
//!
//! ```ignore
//! use ai_chat::{ChatCompletion, CompletionRequest, GroqChatProvider};
//!
//! let provider = GroqChatProvider::new(config)?;
//! let request = CompletionRequest::simple("What helps against a sore throat?");
//! let response = provider.generate(request).await?;
//! println!("{}", response.content);
//! ```

pub mod config;
pub mod error;
pub mod groq;
pub mod ports;
pub(crate) mod retry;

pub use config::ChatConfig;
pub use error::ChatError;
pub use groq::GroqChatProvider;
pub use ports::{
    ChatCompletion, CompletionMessage, CompletionRequest, CompletionResponse, CompletionRole,
    TokenUsage,
};
