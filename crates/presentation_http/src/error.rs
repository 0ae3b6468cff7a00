//! API error handling
//!
//! Maps adapter errors onto HTTP status codes at the boundary:
//! validation failures become 4xx, external-service failures become 5xx
//! and rate limiting is surfaced as 429. Handlers propagate with `?`;
//! the `From` conversions carry the classification.

use ai_chat::ChatError;
use ai_speech::SpeechError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Additional details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        if err.is_validation() {
            return Self::BadRequest(err.to_string());
        }
        match err {
            ChatError::RateLimited => Self::RateLimited,
            ChatError::Configuration(msg) => Self::Internal(msg),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}

impl From<SpeechError> for ApiError {
    fn from(err: SpeechError) -> Self {
        if err.is_validation() {
            return Self::BadRequest(err.to_string());
        }
        match err {
            SpeechError::RateLimited => Self::RateLimited,
            SpeechError::Configuration(msg) => Self::Internal(msg),
            other => Self::ServiceUnavailable(other.to_string()),
        }
    }
}
