//! AI Speech - Speech-to-Text, Text-to-Speech, and audio conversion
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe base64-encoded audio to text (STT)
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//! - `AudioConverter` - FFmpeg-based format conversion
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports) and their request types
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - Google Cloud Speech-to-Text (`speech:recognize`)
//! - Google Cloud Text-to-Speech (`text:synthesize`)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GoogleSpeechProvider, SpeechToText, TextToSpeech};
//! use ai_speech::ports::{SynthesisRequest, TranscribeRequest};
//!
//! let provider = GoogleSpeechProvider::new(config)?;
//!
//! // Transcribe audio
//! let transcription = provider
//!     .transcribe(TranscribeRequest::new(base64_audio))
//!     .await?;
//! println!("Transcribed: {}", transcription.text);
//!
//! // Synthesize speech
//! let audio = provider.synthesize(SynthesisRequest::new("Hello!")).await?;
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub(crate) mod retry;

pub use config::SpeechConfig;
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::{SpeechToText, SynthesisRequest, TextToSpeech, TranscribeRequest};
pub use providers::google::GoogleSpeechProvider;
pub use types::{
    AudioData, AudioEncoding, AudioFormat, EMPTY_TRANSCRIPT_FALLBACK, Transcription, VoiceGender,
    VoiceSelection,
};
