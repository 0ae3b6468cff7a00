//! Chat handler
//!
//! Relays the conversation to the completion service, then synthesizes
//! the reply to speech so the client can play it immediately.

use ai_chat::{CompletionMessage, CompletionRequest};
use ai_speech::SynthesisRequest;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{error::ApiError, handlers::speech::audio_data_url, state::AppState};

/// Chat request body
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages in chronological order
    pub messages: Vec<CompletionMessage>,
    /// Sampling temperature (default 0.7)
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (default 1024)
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// Chat response body
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply text
    pub message: String,
    /// Spoken reply as a base64 data URI
    pub audio_url: String,
}

/// Handle a chat request: completion first, then speech synthesis of
/// the reply.
#[instrument(skip(state, request), fields(message_count = request.messages.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mut completion = CompletionRequest::new(request.messages);
    if let Some(temperature) = request.temperature {
        completion = completion.with_temperature(temperature);
    }
    if let Some(max_tokens) = request.max_tokens {
        completion = completion.with_max_tokens(max_tokens);
    }

    let reply = state.chat.generate(completion).await?;
    let audio = state.tts.synthesize(SynthesisRequest::new(&reply.content)).await?;

    Ok(Json(ChatResponse {
        message: reply.content,
        audio_url: audio_data_url(&audio),
    }))
}
