//! Groq chat-completion client
//!
//! Speaks the OpenAI-compatible `/chat/completions` REST endpoint with
//! bearer authentication. Requests are always non-streaming with a fixed
//! `top_p` of 1.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::ports::{
    ChatCompletion, CompletionMessage, CompletionRequest, CompletionResponse, TokenUsage,
};
use crate::retry::{RetryPolicy, with_backoff};

/// Chat-completion provider backed by the Groq API
#[derive(Debug, Clone)]
pub struct GroqChatProvider {
    client: Client,
    config: ChatConfig,
}

impl GroqChatProvider {
    /// Create a new Groq provider
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Configuration` if the configuration is invalid
    /// (notably a missing API key) or the HTTP client cannot be built.
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        config.validate().map_err(ChatError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ChatError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            initial_delay_ms: self.config.retry_initial_delay_ms,
        }
    }

    async fn dispatch(&self, body: &GroqChatRequest<'_>) -> Result<CompletionResponse, ChatError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(ChatError::RateLimited),
                    Some("model_not_found") => {
                        Err(ChatError::ModelNotAvailable(self.config.model.clone()))
                    },
                    _ => Err(ChatError::ServerError(api_error.error.message)),
                };
            }

            if status.as_u16() == 429 {
                return Err(ChatError::RateLimited);
            }

            warn!(status = %status, body = %error_body, "Completion request failed");
            return Err(ChatError::ServerError(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let completion: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::InvalidResponse("Response contained no choices".to_string()))?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, "Completion received");

        Ok(CompletionResponse {
            content: choice.message.content,
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }
}

/// Wire request for the completions endpoint
#[derive(Debug, Serialize)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: &'a [CompletionMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

/// Wire response from the completions endpoint
#[derive(Debug, Deserialize)]
struct GroqChatResponse {
    model: String,
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI-style API error envelope
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl ChatCompletion for GroqChatProvider {
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    async fn generate(
        &self,
        mut request: CompletionRequest,
    ) -> Result<CompletionResponse, ChatError> {
        if request.messages.is_empty() {
            return Err(ChatError::EmptyConversation);
        }

        // Conversations without a system instruction get the configured
        // one at position 0 before dispatch.
        request.ensure_system_prompt(&self.config.system_prompt);

        let body = GroqChatRequest {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            top_p: 1.0,
            stream: false,
        };

        debug!(model = %self.config.model, "Sending completion request");

        with_backoff(self.retry_policy(), || self.dispatch(&body)).await
    }

    async fn is_available(&self) -> bool {
        let models_url = format!("{}/models", self.config.base_url);

        match self
            .client
            .get(&models_url)
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Chat availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
