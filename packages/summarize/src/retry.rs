//! Bounded retry with a fixed inter-attempt delay.
//!
//! A blunt policy by design: a fixed number of attempts, a fixed pause
//! between them, no jitter, no backoff growth. Adequate for a low-QPS job
//! system; callers needing circuit breaking add it on top.

use std::future::Future;
use std::time::Duration;

/// Default policy for external calls (content fetch, summarization).
pub const EXTERNAL_CALL: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(5));

/// Default policy for durable-store writes.
pub const STORE_WRITE: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(2));

/// A bounded retry policy applied by composition at each call site.
///
/// The error from the final attempt is returned unchanged, so callers can
/// still match on its concrete type.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with `max_attempts` total attempts (including the
    /// first) and a fixed delay between attempts.
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Total attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op`, retrying every failure up to the attempt budget.
    pub async fn retry<T, E, F, Fut>(&self, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.retry_if(op, |_| true).await
    }

    /// Run `op`, retrying only failures for which `should_retry` holds.
    ///
    /// A non-retryable error is returned immediately without sleeping.
    pub async fn retry_if<T, E, F, Fut, P>(&self, mut op: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && should_retry(&err) => {
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
