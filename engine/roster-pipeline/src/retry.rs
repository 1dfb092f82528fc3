use crate::config::SourceConfig;
use crate::error::FetchError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Bounded attempts with linear backoff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &SourceConfig) -> Self {
        Self { max_attempts: config.max_attempts.max(1), backoff: Duration::from_millis(config.backoff_ms) }
    }

    /// Wait after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

/// Run `f` until it succeeds, fails with a non-transient error, or the policy
/// runs out of attempts
pub async fn run_with_retry<F, Fut, T>(
    label: &str,
    policy: RetryPolicy,
    mut f: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 1;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= policy.max_attempts => {
                return Err(FetchError::RetriesExhausted {
                    url: label.to_string(),
                    attempts: attempt,
                    last: e.to_string(),
                });
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                warn!("Attempt {} for {} failed: {}, retrying in {:?}", attempt, label, e, delay);
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
