//! Port definitions for chat completion
//!
//! Defines the trait (port) that completion adapters must implement and
//! the request/response value objects exchanged through it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// Role of a message author in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionRole {
    /// End-user message
    User,
    /// Model-generated message
    Assistant,
    /// System instruction
    System,
}

/// A single message in a conversation (OpenAI-compatible shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: CompletionRole,
    pub content: String,
}

impl CompletionMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::Assistant,
            content: content.into(),
        }
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: CompletionRole::System,
            content: content.into(),
        }
    }
}

/// Request for a chat completion
///
/// Message order is chronological and significant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages in the conversation
    pub messages: Vec<CompletionMessage>,
    /// Sampling temperature (falls back to config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate (falls back to config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request from a message list
    pub const fn new(messages: Vec<CompletionMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a simple single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self::new(vec![CompletionMessage::user(user_message)])
    }

    /// Set temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the token limit
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Whether any message carries the system role
    pub fn has_system_message(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.role == CompletionRole::System)
    }

    /// Insert `prompt` as a system message at position 0 when the
    /// conversation carries none.
    ///
    /// Exactly one system message is inserted; the relative order of all
    /// existing messages is preserved. Conversations that already contain
    /// a system message are left untouched.
    pub fn ensure_system_prompt(&mut self, prompt: &str) {
        if !self.has_system_message() {
            self.messages.insert(0, CompletionMessage::system(prompt));
        }
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason reported by the service
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for chat-completion implementations
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Generate a completion for the conversation
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyConversation` for empty message lists and
    /// a transport/service variant when the external call fails.
    async fn generate(&self, request: CompletionRequest) -> Result<CompletionResponse, ChatError>;

    /// Check if the completion service is reachable
    async fn is_available(&self) -> bool;

    /// Get the configured model identifier
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_simple() {
        let req = CompletionRequest::simple("Hello");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, CompletionRole::User);
        assert_eq!(req.messages[0].content, "Hello");
        assert!(req.temperature.is_none());
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn completion_request_builders_chain() {
        let req = CompletionRequest::simple("Hi")
            .with_temperature(0.3)
            .with_max_tokens(256);
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(256));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CompletionRole::User).unwrap(),
            "\"user\""
        );
        assert_eq!(
            serde_json::to_string(&CompletionRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(
            serde_json::to_string(&CompletionRole::System).unwrap(),
            "\"system\""
        );
    }

    #[test]
    fn message_constructors_set_roles() {
        assert_eq!(CompletionMessage::user("a").role, CompletionRole::User);
        assert_eq!(
            CompletionMessage::assistant("b").role,
            CompletionRole::Assistant
        );
        assert_eq!(CompletionMessage::system("c").role, CompletionRole::System);
    }

    #[test]
    fn ensure_system_prompt_inserts_at_front() {
        let mut req = CompletionRequest::new(vec![
            CompletionMessage::user("first"),
            CompletionMessage::assistant("second"),
            CompletionMessage::user("third"),
        ]);

        req.ensure_system_prompt("be helpful");

        assert_eq!(req.messages.len(), 4);
        assert_eq!(req.messages[0].role, CompletionRole::System);
        assert_eq!(req.messages[0].content, "be helpful");
        assert_eq!(req.messages[1].content, "first");
        assert_eq!(req.messages[2].content, "second");
        assert_eq!(req.messages[3].content, "third");
    }

    #[test]
    fn ensure_system_prompt_is_noop_when_present() {
        let mut req = CompletionRequest::new(vec![
            CompletionMessage::user("question"),
            CompletionMessage::system("existing"),
        ]);

        req.ensure_system_prompt("replacement");

        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].content, "question");
        assert_eq!(req.messages[1].content, "existing");
    }

    #[test]
    fn ensure_system_prompt_inserts_exactly_once() {
        let mut req = CompletionRequest::simple("hello");
        req.ensure_system_prompt("p");
        req.ensure_system_prompt("p");

        let system_count = req
            .messages
            .iter()
            .filter(|m| m.role == CompletionRole::System)
            .count();
        assert_eq!(system_count, 1);
    }

    #[test]
    fn request_skips_none_fields_when_serialized() {
        let req = CompletionRequest::simple("Test");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn message_serializes_role_and_content() {
        let msg = CompletionMessage::user("Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
    }

    #[test]
    fn completion_response_holds_usage() {
        let resp = CompletionResponse {
            content: "Hi".to_string(),
            model: "llama3-70b-8192".to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            finish_reason: Some("stop".to_string()),
        };
        let usage = resp.usage.unwrap();
        assert_eq!(usage.total_tokens, 15);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_message() -> impl Strategy<Value = CompletionMessage> {
            prop_oneof![
                ".{0,40}".prop_map(CompletionMessage::user),
                ".{0,40}".prop_map(CompletionMessage::assistant),
            ]
        }

        proptest! {
            /// Conversations without a system message get the prompt at
            /// position 0 with the original order preserved behind it.
            #[test]
            fn injection_preserves_order(messages in proptest::collection::vec(arb_message(), 1..8)) {
                let mut req = CompletionRequest::new(messages.clone());
                req.ensure_system_prompt("disclaimer");

                prop_assert_eq!(req.messages.len(), messages.len() + 1);
                prop_assert_eq!(req.messages[0].role, CompletionRole::System);
                for (expected, actual) in messages.iter().zip(req.messages.iter().skip(1)) {
                    prop_assert_eq!(expected, actual);
                }
            }
        }
    }
}
