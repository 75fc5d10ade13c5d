//! Exponential-backoff retry executor for oracle calls

use std::future::Future;
use std::time::Duration;

/// Retry policy: attempt count and backoff base.
///
/// Between attempt `k` and `k + 1` (0-indexed) the executor sleeps
/// `2^k * base_delay`, with no jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt; an operation runs `max_retries + 1`
    /// times at most
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Backoff delay after attempt `attempt` (0-indexed). The exponent is
    /// capped so the multiplier cannot overflow.
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// Run `operation` with retries, sleeping exponentially between attempts.
/// On exhaustion the last observed error is propagated, never swallowed.
pub async fn run_with_retry<T, E, F, Fut>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                tracing::warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    error = %error,
                    "Attempt failed"
                );

                if attempt >= policy.max_retries {
                    return Err(error);
                }

                let delay = policy.delay_after(attempt);
                tracing::debug!(
                    operation = operation_name,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn fails_twice_then_succeeds_with_backoff() {
        let attempts = Arc::new(AtomicU32::new(0));
        let started = tokio::time::Instant::now();

        let result = run_with_retry("test_op", policy(), || {
            let attempts = Arc::clone(&attempts);
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(format!("transient failure {n}"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // Backoff slept 1s after attempt 1 and 2s after attempt 2
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_first_attempt_does_not_sleep() {
        let started = tokio::time::Instant::now();
        let result: Result<u32, String> =
            run_with_retry("test_op", policy(), || async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_propagates_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Result<(), String> = run_with_retry("test_op", policy(), || {
            let attempts = Arc::clone(&attempts);
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                Err(format!("failure {n}"))
            }
        })
        .await;

        assert_eq!(result, Err("failure 2".to_string()));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_runs_exactly_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let no_retry = RetryPolicy::new(0, Duration::from_secs(1));

        let result: Result<(), String> = run_with_retry("test_op", no_retry, || {
            let attempts = Arc::clone(&attempts);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err("failure".to_string())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
