//! Pause policy between bulk items.
//!
//! Alpha Vantage's free tier allows only a handful of calls per minute, so
//! the bulk command waits between tickers. The wait is a value rather than
//! a hard-coded sleep so tests can run with [`RateLimit::none`].
//!
//! ```text
//! delay = interval + random_jitter(0..=jitter)
//! ```

use rand::{Rng, rng};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Default spacing between bulk items.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Fixed part of every pause.
    pub interval: Duration,
    /// Upper bound of the random part added to `interval`.
    pub jitter: Duration,
}

impl RateLimit {
    pub fn new(interval: Duration, jitter: Duration) -> Self {
        Self { interval, jitter }
    }

    /// Policy that never waits.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Length of the next pause.
    pub fn next_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.interval;
        }
        self.interval + Duration::from_millis(rng().random_range(0..=jitter_ms))
    }

    /// Sleep for [`next_delay`](Self::next_delay); returns immediately for a
    /// zero delay.
    pub async fn wait(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        debug!(?delay, "Rate limit pause");
        sleep(delay).await;
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RateLimit::default();
        assert_eq!(policy.next_delay(), Duration::from_secs(12));
    }

    #[test]
    fn test_none_is_zero() {
        assert!(RateLimit::none().next_delay().is_zero());
    }

    #[test]
    fn test_jitter_bounds() {
        let policy = RateLimit::new(Duration::from_millis(100), Duration::from_millis(50));
        for _ in 0..200 {
            let delay = policy.next_delay();
            assert!(delay >= Duration::from_millis(100), "{delay:?}");
            assert!(delay <= Duration::from_millis(150), "{delay:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_interval() {
        let policy = RateLimit::new(Duration::from_secs(12), Duration::ZERO);
        let t0 = tokio::time::Instant::now();

        policy.wait().await;

        let elapsed = t0.elapsed();
        assert!(elapsed >= Duration::from_secs(12), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(13), "{elapsed:?}");
    }
}
