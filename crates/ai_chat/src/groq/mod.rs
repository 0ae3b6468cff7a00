//! Groq adapter (OpenAI-compatible chat-completion API)

mod client;

pub use client::GroqChatProvider;
