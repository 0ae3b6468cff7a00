//! Chat-completion errors

use thiserror::Error;

/// Errors that can occur while generating a completion
#[derive(Debug, Error)]
pub enum ChatError {
    /// Failed to connect to the completion service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The conversation contained no messages
    #[error("Conversation must contain at least one message")]
    EmptyConversation,

    /// Model not found or not loaded
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during generation
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server-side failure
    #[error("Server error: {0}")]
    ServerError(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ChatError {
    /// Whether retrying the request may succeed.
    ///
    /// Validation and configuration failures are deterministic and never
    /// retried; transport-level failures and rate limits are.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::RateLimited
        )
    }

    /// Whether the error was caused by invalid caller input.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyConversation)
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conversation_error_message() {
        let err = ChatError::EmptyConversation;
        assert_eq!(
            err.to_string(),
            "Conversation must contain at least one message"
        );
    }

    #[test]
    fn model_not_available_error_message() {
        let err = ChatError::ModelNotAvailable("llama3-70b-8192".to_string());
        assert_eq!(err.to_string(), "Model not available: llama3-70b-8192");
    }

    #[test]
    fn timeout_error_message() {
        let err = ChatError::Timeout(30000);
        assert_eq!(err.to_string(), "Generation timeout after 30000ms");
    }

    #[test]
    fn rate_limited_error_message() {
        let err = ChatError::RateLimited;
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(ChatError::RateLimited.is_retryable());
        assert!(ChatError::Timeout(1000).is_retryable());
        assert!(ChatError::ConnectionFailed("refused".to_string()).is_retryable());
    }

    #[test]
    fn deterministic_errors_are_not_retryable() {
        assert!(!ChatError::EmptyConversation.is_retryable());
        assert!(!ChatError::ModelNotAvailable("x".to_string()).is_retryable());
        assert!(!ChatError::ServerError("500".to_string()).is_retryable());
        assert!(!ChatError::Configuration("no key".to_string()).is_retryable());
    }

    #[test]
    fn only_empty_conversation_is_validation() {
        assert!(ChatError::EmptyConversation.is_validation());
        assert!(!ChatError::RateLimited.is_validation());
        assert!(!ChatError::ServerError("boom".to_string()).is_validation());
    }
}
