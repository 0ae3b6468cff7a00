//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must
//! implement and the request value objects exchanged through them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Request for speech-to-text transcription
///
/// Audio travels as a base64 string; fields left as `None` fall back to
/// the provider's configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscribeRequest {
    /// Base64-encoded audio bytes
    pub audio_content: String,
    /// Recognition encoding name (e.g. "LINEAR16", "WEBM_OPUS")
    pub encoding: Option<String>,
    /// Sample rate of the audio in Hertz
    pub sample_rate_hertz: Option<u32>,
    /// BCP-47 language code
    pub language_code: Option<String>,
}

impl TranscribeRequest {
    /// Create a request with provider defaults for everything but the audio
    pub fn new(audio_content: impl Into<String>) -> Self {
        Self {
            audio_content: audio_content.into(),
            encoding: None,
            sample_rate_hertz: None,
            language_code: None,
        }
    }

    /// Set the encoding name
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// Set the sample rate
    #[must_use]
    pub const fn with_sample_rate_hertz(mut self, sample_rate_hertz: u32) -> Self {
        self.sample_rate_hertz = Some(sample_rate_hertz);
        self
    }

    /// Set the language code
    #[must_use]
    pub fn with_language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }
}

/// Request for text-to-speech synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// Voice name (e.g. "en-US-Chirp-HD-F"); provider default when `None`
    pub voice_name: Option<String>,
    /// Speaking rate multiplier
    pub speaking_rate: Option<f32>,
    /// Pitch adjustment in semitones
    pub pitch: Option<f32>,
}

impl SynthesisRequest {
    /// Create a request using the provider's default voice
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_name: None,
            speaking_rate: None,
            pitch: None,
        }
    }

    /// Set the voice name
    #[must_use]
    pub fn with_voice(mut self, voice_name: impl Into<String>) -> Self {
        self.voice_name = Some(voice_name.into());
        self
    }

    /// Set the speaking rate
    #[must_use]
    pub const fn with_speaking_rate(mut self, speaking_rate: f32) -> Self {
        self.speaking_rate = Some(speaking_rate);
        self
    }

    /// Set the pitch
    #[must_use]
    pub const fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = Some(pitch);
        self
    }
}

/// Port for Speech-to-Text (STT) implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe base64-encoded audio to text
    ///
    /// Implementations validate the payload (presence, base64 shape,
    /// minimum size) before any network call.
    ///
    /// # Errors
    ///
    /// Returns a validation `SpeechError` for bad payloads and a
    /// transport/service variant when the external call fails.
    async fn transcribe(&self, request: TranscribeRequest) -> Result<Transcription, SpeechError>;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech for the given text
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::InvalidText` for empty text,
    /// `SpeechError::InvalidVoice` for malformed voice names, and a
    /// transport/service variant when the external call fails.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioData, SpeechError>;
}
