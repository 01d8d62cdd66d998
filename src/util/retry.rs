//! Retry with exponential backoff for transport failures.

use std::future::Future;
use std::time::Duration;

use crate::error::TychoError;

/// Retry policy configuration.
///
/// Only transport-level failures ([`TychoError::is_retryable`]) are retried;
/// a classified HTTP error response is a deterministic rejection and returns
/// immediately. The delay before attempt *n* (zero-indexed) is
/// `initial_backoff * multiplier^(n-1)`, so the defaults give 1s, 2s.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Backoff before the second attempt.
    pub initial_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Execute an async operation with retry.
    ///
    /// When every attempt fails at the transport level the result is
    /// [`TychoError::Unreachable`], carrying each attempt's failure message
    /// so callers can see how the attempts differed.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, TychoError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TychoError>>,
    {
        let mut backoff = self.initial_backoff;
        let mut attempt_errors = Vec::new();

        for attempt in 0..self.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "transport attempt failed"
                    );
                    attempt_errors.push(e.to_string());

                    if attempt + 1 >= self.max_attempts {
                        break;
                    }

                    tokio::time::sleep(backoff).await;
                    backoff = Duration::from_secs_f64(backoff.as_secs_f64() * self.multiplier);
                }
                Err(e) => return Err(e),
            }
        }

        Err(TychoError::Unreachable {
            attempts: self.max_attempts,
            attempt_errors,
        })
    }
}
