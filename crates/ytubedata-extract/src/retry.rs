//! Bounded retry with a fixed back-off for the primary extractor.
//!
//! [`retry_fixed`] re-runs an operation on transient client errors only. The
//! delay between attempts is constant; the error from the final attempt is
//! the one returned, earlier ones are only logged.

use std::future::Future;
use std::time::Duration;

use ytubedata_core::AppConfig;

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Sleep between consecutive attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: Duration::from_secs(config.retry_backoff_secs),
        }
    }
}

/// Runs `operation` up to `policy.max_attempts` times.
///
/// | Attempt | On retriable failure                 |
/// |---------|--------------------------------------|
/// | 1       | warn, sleep `backoff`, try again     |
/// | 2       | warn, sleep `backoff`, try again     |
/// | 3       | return the error                     |
///
/// Non-retriable errors are returned immediately.
pub(crate) async fn retry_fixed<T, F, Fut>(
    policy: RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, ExtractError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExtractError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_secs = policy.backoff.as_secs(),
                    error = %err,
                    "{operation_name} failed, retrying after back-off"
                );
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }
}
