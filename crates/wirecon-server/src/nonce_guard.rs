//! Replay protection for request nonces.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Default horizon a nonce stays blocked for.
///
/// Matches the timestamp window: a request older than the window is
/// rejected before the nonce check, so entries past the horizon can
/// never be replayed successfully anyway.
pub const NONCE_EXPIRY: Duration = Duration::from_secs(60);

/// Tracks recently seen nonces and refuses reuse within the horizon.
#[derive(Debug)]
pub struct NonceGuard {
    expiry: Duration,
    seen: Mutex<HashMap<String, Instant>>,
}

impl NonceGuard {
    pub fn new(expiry: Duration) -> Self {
        Self {
            expiry,
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Record the nonce if it has not been seen within the horizon.
    ///
    /// Returns `true` when the nonce is fresh and is now consumed,
    /// `false` on a replay. Expired entries are pruned on every call.
    pub async fn use_nonce(&self, nonce: &str) -> bool {
        let now = Instant::now();
        let mut seen = self.seen.lock().await;
        seen.retain(|_, used_at| now.duration_since(*used_at) <= self.expiry);

        if seen.contains_key(nonce) {
            return false;
        }
        seen.insert(nonce.to_owned(), now);
        true
    }
}

impl Default for NonceGuard {
    fn default() -> Self {
        Self::new(NONCE_EXPIRY)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_nonce_is_accepted_once() {
        let guard = NonceGuard::default();
        assert!(guard.use_nonce("abc").await);
        assert!(!guard.use_nonce("abc").await);
        assert!(guard.use_nonce("def").await);
    }

    #[tokio::test]
    async fn nonce_becomes_reusable_after_expiry() {
        let guard = NonceGuard::new(Duration::from_millis(20));
        assert!(guard.use_nonce("abc").await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(guard.use_nonce("abc").await);
    }
}
