//! Bounded retry loop around cloud API calls.
//!
//! Each call is repeated on a fixed interval while it fails with a
//! transient error, until it succeeds, fails with a non-retryable error,
//! or the timeout elapses.

use crate::error::{ProviderError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Timeout for retried read calls.
pub const READ_RETRY_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Timeout for retried write calls.
pub const WRITE_RETRY_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Pause between attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Extra code most monitor calls treat as transient.
pub const INTERNAL_ERROR: &str = "InternalError";

/// Codes that are always considered transient.
pub const RETRYABLE_ERROR_CODES: &[&str] = &[
    crate::error::CLIENT_NETWORK_ERROR,
    crate::error::CLIENT_HTTP_STATUS_ERROR,
    "RequestLimitExceeded",
    "ResourceInUse",
    "ResourceInsufficient",
    "ResourceUnavailable",
    "ResourceBusy",
    "TradeUnknownError",
];

/// Timeouts and pacing for retried calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Timeout for read calls.
    pub read_timeout: Duration,
    /// Timeout for write calls.
    pub write_timeout: Duration,
    /// Pause between attempts, also used as the poll interval of waiters.
    pub interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            read_timeout: READ_RETRY_TIMEOUT,
            write_timeout: WRITE_RETRY_TIMEOUT,
            interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

/// Outcome of one attempt that did not succeed.
#[derive(Debug)]
pub enum RetryError {
    /// Try again after the interval.
    Retryable(ProviderError),
    /// Stop and return the error.
    NonRetryable(ProviderError),
}

impl RetryError {
    /// The wrapped error.
    pub fn into_inner(self) -> ProviderError {
        match self {
            Self::Retryable(err) | Self::NonRetryable(err) => err,
        }
    }
}

/// Whether `code` matches `expected` exactly or as a dotted sub-code.
pub fn is_expect_error(code: &str, expected: &[&str]) -> bool {
    expected.iter().any(|e| {
        code == *e
            || code
                .strip_prefix(e)
                .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Classify `err`: API errors whose code is in [`RETRYABLE_ERROR_CODES`] or
/// `additional` are retryable, everything else is not.
pub fn retry_error(err: ProviderError, additional: &[&str]) -> RetryError {
    let retryable = err
        .api_code()
        .is_some_and(|code| is_expect_error(code, RETRYABLE_ERROR_CODES) || is_expect_error(code, additional));
    if retryable {
        RetryError::Retryable(err)
    } else {
        RetryError::NonRetryable(err)
    }
}

/// Run `f` until it succeeds, returns a non-retryable error, or `timeout` elapses.
pub async fn retry<T, F, Fut>(timeout: Duration, interval: Duration, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, RetryError>>,
{
    let deadline = Instant::now() + timeout;
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match f().await {
            Ok(value) => return Ok(value),
            Err(RetryError::NonRetryable(err)) => return Err(err),
            Err(RetryError::Retryable(err)) => {
                let now = Instant::now();
                if now + interval > deadline {
                    warn!(attempt, error = %err, "retry timed out");
                    return Err(ProviderError::DeadlineExceeded(format!(
                        "timeout after {:?}, last error: {}",
                        timeout, err
                    )));
                }
                debug!(attempt, error = %err, "retrying");
                tokio::time::sleep(interval).await;
            },
        }
    }
}
