use crate::shared::Result;
use std::time::Duration;
use tracing::warn;

/// Upper bound for a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Failure of one attempt, classified for the retry loop
#[derive(Debug)]
pub(crate) enum AttemptError {
    /// Connection errors, timeouts, HTTP 5xx and 429
    Transient(anyhow::Error),
    /// Anything a retry cannot fix (4xx, bad body)
    Fatal(anyhow::Error),
}

impl AttemptError {
    pub(crate) fn from_status(status: reqwest::StatusCode, error: anyhow::Error) -> Self {
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Self::Transient(error)
        } else {
            Self::Fatal(error)
        }
    }
}

impl From<reqwest::Error> for AttemptError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Transient(e.into())
        } else {
            Self::Fatal(e.into())
        }
    }
}

/// Backoff before retry number `attempt` (1-based): base, 2*base, 4*base... capped
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
    base.saturating_mul(factor).min(MAX_BACKOFF)
}

/// Runs `operation` until it succeeds, fails fatally, or `max_attempts` is used up.
/// Attempts are sequential; the thread sleeps between them.
pub(crate) fn with_retry<T>(
    what: &str,
    max_attempts: u32,
    base_delay: Duration,
    mut operation: impl FnMut(u32) -> std::result::Result<T, AttemptError>,
) -> Result<T> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(e)) => return Err(e),
            Err(AttemptError::Transient(e)) if attempt >= max_attempts => {
                return Err(e.context(format!("{} failed after {} attempts", what, attempt)))
            }
            Err(AttemptError::Transient(e)) => {
                let delay = backoff_delay(base_delay, attempt);
                warn!(
                    request = what,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "transient failure, retrying"
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
