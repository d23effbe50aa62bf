//! Per-IP request rate limiting.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Sliding window length.
pub const RATE_WINDOW: Duration = Duration::from_secs(60);

/// Sliding-window rate limiter keyed by client address.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    log: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            log: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a request from `ip` fits the window, and count it
    /// if it does.
    ///
    /// Every call expires stale timestamps across all entries and drops
    /// addresses whose window has fully drained, so the map stays
    /// bounded by the set of recently active clients.
    pub async fn allow(&self, ip: &str) -> bool {
        let now = Instant::now();
        let mut log = self.log.lock().await;
        log.retain(|_, timestamps| {
            while timestamps
                .front()
                .is_some_and(|t| now.duration_since(*t) > self.window)
            {
                timestamps.pop_front();
            }
            !timestamps.is_empty()
        });

        let timestamps = log.entry(ip.to_owned()).or_default();
        if timestamps.len() >= self.max_requests {
            return false;
        }
        timestamps.push_back(now);
        true
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_the_budget_then_rejects() {
        let limiter = RateLimiter::new(3, RATE_WINDOW);
        assert!(limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.1").await);
        assert!(!limiter.allow("10.0.0.1").await);
    }

    #[tokio::test]
    async fn budgets_are_tracked_per_address() {
        let limiter = RateLimiter::new(1, RATE_WINDOW);
        assert!(limiter.allow("10.0.0.1").await);
        assert!(!limiter.allow("10.0.0.1").await);
        assert!(limiter.allow("10.0.0.2").await);
    }

    #[tokio::test]
    async fn idle_addresses_are_dropped_after_the_window() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.allow("10.0.0.1").await);
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(limiter.allow("10.0.0.2").await);
        let log = limiter.log.lock().await;
        assert!(!log.contains_key("10.0.0.1"));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn budget_recovers_after_the_window_slides() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.allow("10.0.0.1").await);
        assert!(!limiter.allow("10.0.0.1").await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.allow("10.0.0.1").await);
    }
}
