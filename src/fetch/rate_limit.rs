//! Per-provider request pacing.
//!
//! The provider allows a fixed number of requests per minute. Calls are
//! spaced at least `60000 / rate_per_minute` ms apart by reserving the next
//! send slot under a single lock acquisition, so concurrent callers cannot
//! observe the same "last request" time and burst through together.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

/// Minimum-interval gate, keyed by provider name. Never rejects a call,
/// only delays it.
pub struct RateLimiter {
    min_interval: Duration,
    slots: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    /// Create a limiter allowing `rate_per_minute` requests per provider.
    pub fn new(rate_per_minute: u32) -> Self {
        let rate = rate_per_minute.max(1);
        Self {
            min_interval: Duration::from_millis(60_000 / u64::from(rate)),
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a request to `provider` may be sent.
    ///
    /// The deadline is computed and written in one lock acquisition, so
    /// every concurrent caller reserves a distinct slot spaced by the
    /// minimum interval. Callers then sleep outside the lock until their
    /// reserved slot arrives. Dropping the future after reservation leaves
    /// the slot consumed, which only makes the limiter more conservative.
    pub async fn acquire(&self, provider: &str) {
        let deadline = {
            let mut slots = self.slots.lock().await;
            let now = Instant::now();
            let deadline = match slots.get(provider) {
                Some(last) => (*last + self.min_interval).max(now),
                None => now,
            };
            slots.insert(provider.to_string(), deadline);
            deadline
        };

        let now = Instant::now();
        if deadline > now {
            debug!(
                provider,
                wait_ms = (deadline - now).as_millis() as u64,
                "rate limit wait"
            );
            sleep_until(deadline).await;
        }
    }
}
