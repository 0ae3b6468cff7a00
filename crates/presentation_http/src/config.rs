//! Application configuration
//!
//! Composes the adapter configs into a single `AppConfig` loaded from
//! defaults, an optional `config.toml` and `VOXCARE_*` environment
//! variables. Missing or invalid credentials fail at process start,
//! never per-request.

use ai_chat::ChatConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Maximum request body size in bytes (audio uploads dominate)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string()]
}

const fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
            shutdown_timeout_secs: Some(30),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completion configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Speech processing configuration
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., VOXCARE_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("VOXCARE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate the composed configuration
    ///
    /// # Errors
    ///
    /// Returns the first validation failure across the adapter configs.
    pub fn validate(&self) -> Result<(), String> {
        self.chat.validate()?;
        self.speech.validate()?;

        if self.server.max_body_bytes == 0 {
            return Err("Max body size must be greater than 0".to_string());
        }

        Ok(())
    }
}
