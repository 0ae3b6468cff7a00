//! Configuration for speech processing

use serde::{Deserialize, Serialize};

/// Configuration for the Google Cloud speech services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Google Cloud API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Speech-to-Text API base URL
    #[serde(default = "default_stt_base_url")]
    pub stt_base_url: String,

    /// Text-to-Speech API base URL
    #[serde(default = "default_tts_base_url")]
    pub tts_base_url: String,

    /// Default voice for synthesis
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Default recognition language (BCP-47)
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Default recognition sample rate in Hertz
    #[serde(default = "default_sample_rate_hertz")]
    pub default_sample_rate_hertz: u32,

    /// Default synthesis speaking rate (0.25 to 4.0)
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f32,

    /// Default synthesis pitch in semitones (-20.0 to 20.0)
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum decoded audio size accepted for recognition, in bytes
    #[serde(default = "default_min_audio_bytes")]
    pub min_audio_bytes: usize,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds
    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,
}

fn default_stt_base_url() -> String {
    "https://speech.googleapis.com/v1".to_string()
}

fn default_tts_base_url() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn default_voice() -> String {
    "en-US-Chirp-HD-F".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

const fn default_sample_rate_hertz() -> u32 {
    16000
}

const fn default_speaking_rate() -> f32 {
    1.0
}

const fn default_pitch() -> f32 {
    0.0
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_min_audio_bytes() -> usize {
    100
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_retry_initial_delay_ms() -> u64 {
    200
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            stt_base_url: default_stt_base_url(),
            tts_base_url: default_tts_base_url(),
            default_voice: default_voice(),
            default_language: default_language(),
            default_sample_rate_hertz: default_sample_rate_hertz(),
            speaking_rate: default_speaking_rate(),
            pitch: default_pitch(),
            timeout_ms: default_timeout_ms(),
            min_audio_bytes: default_min_audio_bytes(),
            max_retries: default_max_retries(),
            retry_initial_delay_ms: default_retry_initial_delay_ms(),
        }
    }
}

impl SpeechConfig {
    /// Create a minimal config for testing
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            return Err("Google Cloud API key is required".to_string());
        }

        if !(0.25..=4.0).contains(&self.speaking_rate) {
            return Err(format!(
                "Speaking rate must be between 0.25 and 4.0, got {}",
                self.speaking_rate
            ));
        }

        if !(-20.0..=20.0).contains(&self.pitch) {
            return Err(format!(
                "Pitch must be between -20.0 and 20.0, got {}",
                self.pitch
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.min_audio_bytes == 0 {
            return Err("Minimum audio size must be greater than 0".to_string());
        }

        Ok(())
    }
}
