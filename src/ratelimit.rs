//! Per-action token bucket shared by every call made through one client.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Requests per second allowed for each action by default.
pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    updated: Instant,
}

/// Throttles outbound calls per API action name.
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl RateLimiter {
    /// Allow `limit` requests per second for every action.
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Requests per second allowed for each action.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Take a token for `action`, waiting until one is available.
    pub async fn check(&self, action: &str) {
        let wait = self.reserve(action);
        if !wait.is_zero() {
            trace!(action, wait_ms = wait.as_millis() as u64, "rate limited");
            tokio::time::sleep(wait).await;
        }
    }

    /// Take a token now and return how long the caller must wait before using it.
    fn reserve(&self, action: &str) -> Duration {
        let rate = f64::from(self.limit);
        let now = Instant::now();
        let mut buckets = self.buckets.lock();
        let bucket = buckets.entry(action.to_string()).or_insert(Bucket {
            tokens: rate,
            updated: now,
        });

        let elapsed = now.saturating_duration_since(bucket.updated).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * rate).min(rate);
        bucket.updated = now;
        bucket.tokens -= 1.0;

        if bucket.tokens >= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(-bucket.tokens / rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits() {
        assert_eq!(RateLimiter::default().limit(), DEFAULT_LIMIT);
        assert_eq!(RateLimiter::new(0).limit(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_then_wait() {
        let limiter = RateLimiter::new(2);
        assert_eq!(limiter.reserve("CreateAlarmPolicy"), Duration::ZERO);
        assert_eq!(limiter.reserve("CreateAlarmPolicy"), Duration::ZERO);
        let wait = limiter.reserve("CreateAlarmPolicy");
        assert!(wait > Duration::ZERO && wait <= Duration::from_millis(500));

        // Buckets are independent per action.
        assert_eq!(limiter.reserve("DeleteAlarmPolicy"), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_sleeps_when_empty() {
        let limiter = RateLimiter::new(1);
        let start = Instant::now();
        limiter.check("OpenBackUp").await;
        limiter.check("OpenBackUp").await;
        assert!(start.elapsed() >= Duration::from_millis(999));
    }
}
