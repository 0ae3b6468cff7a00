//! Speech processing provider implementations
//!
//! Contains concrete implementations of the `SpeechToText` and `TextToSpeech` traits.

pub mod google;

pub use google::GoogleSpeechProvider;
