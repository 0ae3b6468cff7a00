//! Application state shared across handlers

use std::sync::Arc;

use ai_chat::ChatCompletion;
use ai_speech::{SpeechToText, TextToSpeech};

use crate::config::AppConfig;

/// Shared application state
///
/// Holds the ports, not the concrete providers, so router tests can
/// inject stubs.
#[derive(Clone)]
pub struct AppState {
    /// Chat-completion port
    pub chat: Arc<dyn ChatCompletion>,
    /// Speech-to-text port
    pub stt: Arc<dyn SpeechToText>,
    /// Text-to-speech port
    pub tts: Arc<dyn TextToSpeech>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("chat_model", &self.chat.model_name())
            .finish_non_exhaustive()
    }
}
