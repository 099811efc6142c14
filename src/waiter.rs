//! Poll an object's status after a mutating call until it settles.

use crate::error::{ProviderError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Consecutive "not found" refreshes tolerated before giving up.
pub const NOT_FOUND_CHECKS: u32 = 20;

/// Describes what to wait for.
#[derive(Debug, Clone)]
pub struct StateChangeConf {
    /// States that mean "still working".
    pub pending: Vec<String>,
    /// States that mean "done".
    pub target: Vec<String>,
    /// States that mean "will never get there".
    pub fail: Vec<String>,
    /// Give up after this long.
    pub timeout: Duration,
    /// Pause between refreshes.
    pub poll_interval: Duration,
    /// Pause before the first refresh.
    pub delay: Duration,
}

impl StateChangeConf {
    /// Wait for one of `target`, tolerating `pending`.
    pub fn new(pending: &[&str], target: &[&str], timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            pending: pending.iter().map(|s| s.to_string()).collect(),
            target: target.iter().map(|s| s.to_string()).collect(),
            fail: Vec::new(),
            timeout,
            poll_interval,
            delay: Duration::ZERO,
        }
    }

    /// States that abort the wait with an error.
    pub fn with_fail(mut self, fail: &[&str]) -> Self {
        self.fail = fail.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sleep before the first refresh.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Refresh until a target state is reached.
    ///
    /// `refresh` returns `Ok(None)` when the object cannot be found, or
    /// `Ok(Some((object, state)))`. A refresh error ends the wait.
    pub async fn wait_for_state<T, F, Fut>(&self, mut refresh: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<(T, String)>>>,
    {
        let deadline = Instant::now() + self.timeout;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut not_found: u32 = 0;
        let mut last_state = String::new();
        loop {
            match refresh().await? {
                None => {
                    not_found += 1;
                    if not_found > NOT_FOUND_CHECKS {
                        return Err(ProviderError::NotFound(format!(
                            "couldn't find resource ({} retries)",
                            NOT_FOUND_CHECKS
                        )));
                    }
                },
                Some((object, state)) => {
                    not_found = 0;
                    if self.target.iter().any(|t| *t == state) {
                        return Ok(object);
                    }
                    if self.fail.iter().any(|f| *f == state) {
                        return Err(ProviderError::FailedPrecondition(format!(
                            "unexpected state '{}', wanted target '{}'",
                            state,
                            self.target.join(", ")
                        )));
                    }
                    if !self.pending.is_empty() && !self.pending.iter().any(|p| *p == state) {
                        return Err(ProviderError::FailedPrecondition(format!(
                            "unexpected state '{}', wanted target '{}'",
                            state,
                            self.target.join(", ")
                        )));
                    }
                    debug!(state = %state, "waiting for state change");
                    last_state = state;
                },
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(ProviderError::DeadlineExceeded(format!(
                    "timeout while waiting for state to become '{}' (last state: '{}', timeout: {:?})",
                    self.target.join(", "),
                    last_state,
                    self.timeout
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn conf() -> StateChangeConf {
        StateChangeConf::new(
            &["Init", "Modify"],
            &["Serving"],
            Duration::from_millis(200),
            Duration::from_millis(1),
        )
        .with_fail(&["Deleted"])
    }

    fn scripted(states: &[&str]) -> Mutex<Vec<String>> {
        Mutex::new(states.iter().rev().map(|s| s.to_string()).collect())
    }

    #[tokio::test]
    async fn test_reaches_target() {
        let script = scripted(&["Modify", "Modify", "Serving"]);
        let script = &script;
        let result = conf()
            .wait_for_state(move || async move {
                let state = script.lock().unwrap().pop().unwrap_or_default();
                Ok(Some((state.clone(), state)))
            })
            .await;
        assert_eq!(result.unwrap(), "Serving");
    }

    #[tokio::test]
    async fn test_fail_state_stops_immediately() {
        let script = scripted(&["Modify", "Deleted", "Serving"]);
        let script = &script;
        let result: Result<String> = conf()
            .wait_for_state(move || async move {
                let state = script.lock().unwrap().pop().unwrap_or_default();
                Ok(Some((state.clone(), state)))
            })
            .await;
        assert!(matches!(result, Err(ProviderError::FailedPrecondition(_))));
        assert_eq!(script.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_state_is_an_error() {
        let result: Result<()> = conf()
            .wait_for_state(|| async { Ok(Some(((), "Exploded".to_string()))) })
            .await;
        assert!(result.unwrap_err().to_string().contains("Exploded"));
    }

    #[tokio::test]
    async fn test_times_out_while_pending() {
        let conf = StateChangeConf::new(&["1"], &["2"], Duration::from_millis(20), Duration::from_millis(5));
        let result: Result<()> = conf
            .wait_for_state(|| async { Ok(Some(((), "1".to_string()))) })
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, ProviderError::DeadlineExceeded(_)));
        assert!(err.to_string().contains("last state: '1'"));
    }

    #[tokio::test]
    async fn test_refresh_error_propagates() {
        let result: Result<()> = conf()
            .wait_for_state(|| async { Err(ProviderError::Sdk("describe failed".into())) })
            .await;
        assert_eq!(result.unwrap_err().message(), "describe failed");
    }

    #[tokio::test]
    async fn test_not_found_gives_up() {
        let conf = StateChangeConf::new(&[], &["Serving"], Duration::from_secs(5), Duration::from_millis(1));
        let result: Result<()> = conf.wait_for_state(|| async { Ok(None) }).await;
        assert!(result.unwrap_err().is_not_found());
    }
}
