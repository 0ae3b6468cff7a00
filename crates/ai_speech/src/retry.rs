//! Bounded retry with exponential backoff for transient failures

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::SpeechError;

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
) -> Result<T, SpeechError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SpeechError>>,
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

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    const POLICY: RetryPolicy = RetryPolicy {
        max_retries: 2,
        initial_delay_ms: 1,
    };

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(POLICY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, SpeechError>("done") }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_rate_limits() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(POLICY, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(SpeechError::RateLimited)
                } else {
                    Ok("recovered")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_validation_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_backoff(POLICY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SpeechError::NoAudioContent) }
        })
        .await;

        assert!(matches!(result, Err(SpeechError::NoAudioContent)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_backoff(POLICY, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SpeechError::ConnectionFailed("refused".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(SpeechError::ConnectionFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let policy = RetryPolicy {
            max_retries: 3,
            initial_delay_ms: 50,
        };
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(50));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
    }
}
