//! Configuration for the chat-completion adapter

use serde::{Deserialize, Serialize};

/// Default system instruction injected into conversations that carry none.
pub const MEDICAL_SYSTEM_PROMPT: &str = "You are an AI medical assistant that provides helpful \
     information on health topics. You are not a replacement for professional medical advice, \
     diagnosis, or treatment. Always advise users to consult with a healthcare professional for \
     serious medical concerns.";

/// Configuration for the chat-completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Base URL of the OpenAI-compatible completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key for bearer authentication
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Default sampling temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Default maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// System instruction injected when a conversation has none
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_initial_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-70b-8192".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    1024
}

fn default_system_prompt() -> String {
    MEDICAL_SYSTEM_PROMPT.to_string()
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_retry_delay_ms() -> u64 {
    200
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: default_system_prompt(),
            max_retries: default_max_retries(),
            retry_initial_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ChatConfig {
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
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.as_deref().is_none_or(str::is_empty) {
            return Err("Chat API key is required".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("Max tokens must be greater than 0".to_string());
        }

        Ok(())
    }
}
