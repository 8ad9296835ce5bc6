use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// How long to keep trying to reach the database at startup.
///
/// The wait doubles after every failed attempt and never exceeds `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts made after the first one fails
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
            ..Self::default()
        }
    }

    /// Waits between consecutive attempts, one per retry
    pub fn delays(self) -> impl Iterator<Item = Duration> {
        let max = self.max_delay;
        std::iter::successors(Some(self.initial_delay.min(max)), move |delay| {
            Some(delay.saturating_mul(2).min(max))
        })
        .take(self.max_retries as usize)
    }
}

impl Default for RetryConfig {
    /// 5 retries from 200ms up to 5s, enough for a database container
    /// started alongside the service
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Run `operation` until it succeeds or the retries in `config` run out.
///
/// Makes at most `max_retries + 1` attempts and returns the last error.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = config.delays();
    let mut attempt = 1u32;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(delay) = delays.next() else {
            error!(attempts = attempt, error = %err, "Giving up");
            return Err(err);
        };

        warn!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
