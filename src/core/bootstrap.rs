//! Startup connection gate for the search engine.
//!
//! The HTTP server only starts once a handle to the engine has been
//! established. Attempts are repeated at a fixed interval; there is
//! no backoff and, by default, no attempt limit.

use std::future::Future;
use std::time::Duration;

use crate::core::error::{Result, SearchError};

/// Fixed-interval retry policy used while waiting for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between consecutive attempts
    pub interval: Duration,

    /// Stop after this many attempts; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempts` failures
    fn allows_retry(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }
}

/// Run `connect` until it succeeds or the policy gives up
///
/// Each failure is logged at WARN and followed by a sleep of
/// `policy.interval`. Uses `tokio::time::sleep`, so tests can drive it
/// with a paused clock.
///
/// # Errors
///
/// `UpstreamUnavailable` carrying the last failure once
/// `max_attempts` is exhausted.
pub async fn connect_with_retry<T, F, Fut>(policy: RetryPolicy, mut connect: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        match connect().await {
            Ok(handle) => {
                tracing::info!(attempts, "Connected to search engine");
                return Ok(handle);
            }
            Err(e) => {
                if !policy.allows_retry(attempts) {
                    tracing::error!(attempts, error = %e, "Giving up on search engine");
                    return Err(SearchError::UpstreamUnavailable(format!(
                        "no connection after {attempts} attempts: {e}"
                    )));
                }

                tracing::warn!(
                    attempts,
                    error = %e,
                    "Search engine not ready, retrying in {:?}",
                    policy.interval
                );
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
