//! Bounded exponential backoff for whole-run snapshot fetches.
//!
//! Scheduling runs are side-effect free until their output is committed, so
//! when the snapshot fetch fails with a transient error the caller can safely
//! retry the entire fetch. Permanent failures (authorization, malformed
//! responses) are returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay; doubles after each failed attempt.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Run `op` up to `max_attempts` times, sleeping `base_delay * 2^n` between
/// attempts. Only transient [`FetchError`]s are retried.
pub async fn with_backoff<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts || !err.is_transient() {
                    return Err(err);
                }
                let delay = base_delay * 2u32.pow(attempt - 1);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "transient fetch failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
