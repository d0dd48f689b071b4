//! Retry policy for completion calls.
//!
//! Upstream completion APIs fail transiently: connections drop, rate
//! limits trip, backends return 5xx for a few seconds. Calls go through
//! [`with_retry`], which retries only errors that say they are worth
//! retrying, with exponential backoff and jitter via `backon`.

use backon::{ExponentialBuilder, Retryable};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Classifies errors worth another attempt.
///
/// Implemented by error types whose variants distinguish transient
/// failures (network, throttling, upstream outage) from permanent ones
/// (bad request, bad credentials, malformed response).
pub trait RetryableError {
    /// Whether another attempt could plausibly succeed.
    fn is_retryable(&self) -> bool;
}

/// Backoff schedule for retried operations.
///
/// Delays double from `base_delay` upward, each with up to one
/// `base_delay` of random jitter added, so consecutive delays always
/// grow. With the defaults the waits are roughly 300ms, 600ms, 1.2s,
/// 2.4s, 4.8s.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: usize,

    /// Delay before the first retry; doubles on each retry after that
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_factor(2.0)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

/// Run `op`, retrying retryable errors according to `policy`.
///
/// Non-retryable errors surface immediately. When the retry budget runs
/// out, the last error surfaces unchanged. Each retry is logged at warn
/// level with the upcoming delay.
pub async fn with_retry<T, E, Fut, Op>(policy: &RetryPolicy, op: Op) -> Result<T, E>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + Display,
{
    op.retry(policy.backoff())
        .when(E::is_retryable)
        .notify(|err, delay| {
            tracing::warn!(error = %err, delay = ?delay, "retrying after transient failure");
        })
        .await
}
