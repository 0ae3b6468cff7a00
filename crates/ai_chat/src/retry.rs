//! Bounded retry with exponential backoff for transient failures

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ChatError;

/// Retry policy for external calls
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    /// Maximum retry attempts after the initial call
    pub max_retries: u32,
    /// Delay before the first retry; doubles per attempt
    pub initial_delay_ms: u64,
}

impl RetryPolicy {
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let ms = self.initial_delay_ms.saturating_mul(1u64 << attempt.min(16));
        Duration::from_millis(ms)
    }
}

/// Run `operation`, retrying retryable errors up to the policy limit.
pub(crate) async fn with_backoff<F, Fut, T>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, ChatError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ChatError>>,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempts = attempt + 1, "Operation succeeded after retry");
                }
                return Ok(value);
            },
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for_attempt(attempt);
                attempt += 1;
                warn!(
                    attempt = attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
            },
            Err(err) => return Err(err),
        }
    }
}
