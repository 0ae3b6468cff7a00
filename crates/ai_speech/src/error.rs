//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No audio content in the request
    #[error("No audio content provided")]
    NoAudioContent,

    /// Audio content is not valid base64
    #[error("Invalid base64 audio content: {0}")]
    InvalidBase64(String),

    /// Decoded audio is too small to contain speech
    #[error("Audio too small: {size_bytes} bytes is below the minimum of {min_bytes} bytes")]
    AudioTooSmall {
        /// Size of the decoded audio
        size_bytes: usize,
        /// Minimum accepted size
        min_bytes: usize,
    },

    /// Voice name could not be parsed
    #[error("Invalid voice name: {0}")]
    InvalidVoice(String),

    /// Text for synthesis is empty
    #[error("Text for synthesis cannot be empty")]
    InvalidText,

    /// Invalid audio format or corrupted data
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Transcription failed on the service side
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Synthesis failed on the service side
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Audio processing/conversion failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),
}

impl SpeechError {
    /// Whether the error was caused by the caller's input rather than
    /// the service or the transport.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoAudioContent
                | Self::InvalidBase64(_)
                | Self::AudioTooSmall { .. }
                | Self::InvalidVoice(_)
                | Self::InvalidText
                | Self::InvalidAudio(_)
        )
    }

    /// Whether a retry with backoff may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::RateLimited
        )
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30_000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
