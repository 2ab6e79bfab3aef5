use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Local request budget for a shared, rate-limited translation API.
///
/// The window is rolling from its last reset, not aligned to the wall clock.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub hourly_limit: u32,
    pub window: Duration,
    pub min_interval: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            hourly_limit: 50,
            window: Duration::from_millis(3_600_000),
            min_interval: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug)]
pub struct RatePolicy {
    cfg: RateLimitConfig,
    requests_this_window: u32,
    window_start: Instant,
    last_request_time: Option<Instant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateSnapshot {
    pub hourly_limit: u32,
    pub requests_this_window: u32,
    pub window_resets_in_ms: u64,
    pub required_delay_ms: u64,
}

impl RatePolicy {
    pub fn new(cfg: RateLimitConfig) -> Self {
        Self {
            cfg,
            requests_this_window: 0,
            window_start: Instant::now(),
            last_request_time: None,
        }
    }

    pub fn hourly_limit(&self) -> u32 {
        self.cfg.hourly_limit
    }

    pub fn can_proceed(&self) -> bool {
        self.requests_this_window < self.cfg.hourly_limit
    }

    /// Count one external call against the window.
    pub fn record_request(&mut self) {
        self.requests_this_window += 1;
        self.last_request_time = Some(Instant::now());
    }

    /// Stamp the end of a serviced request; pacing is measured from here.
    pub fn mark_completed(&mut self) {
        self.last_request_time = Some(Instant::now());
    }

    pub fn reset_if_window_expired(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.window_start) >= self.cfg.window {
            tracing::debug!(
                "Translation window expired after {} requests, resetting",
                self.requests_this_window
            );
            self.requests_this_window = 0;
            self.window_start = now;
        }
    }

    pub fn required_delay(&self) -> Duration {
        match self.last_request_time {
            Some(last) => self.cfg.min_interval.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    pub fn snapshot(&self) -> RateSnapshot {
        let window_left = self
            .cfg
            .window
            .saturating_sub(self.window_start.elapsed());
        RateSnapshot {
            hourly_limit: self.cfg.hourly_limit,
            requests_this_window: self.requests_this_window,
            window_resets_in_ms: window_left.as_millis() as u64,
            required_delay_ms: self.required_delay().as_millis() as u64,
        }
    }
}

/// Bounded retries with linear backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryPolicy {
    /// Wait after the given failed attempt (1-based) before the next one.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(limit: u32) -> RatePolicy {
        RatePolicy::new(RateLimitConfig {
            hourly_limit: limit,
            ..Default::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn blocks_once_limit_is_reached() {
        let mut rate = policy(2);
        assert!(rate.can_proceed());
        rate.record_request();
        assert!(rate.can_proceed());
        rate.record_request();
        assert!(!rate.can_proceed());
    }

    #[tokio::test(start_paused = true)]
    async fn window_resets_after_an_hour() {
        let mut rate = policy(1);
        rate.record_request();

        tokio::time::advance(Duration::from_millis(3_599_999)).await;
        rate.reset_if_window_expired();
        assert!(!rate.can_proceed());

        tokio::time::advance(Duration::from_millis(1)).await;
        rate.reset_if_window_expired();
        assert!(rate.can_proceed());
        assert_eq!(rate.snapshot().requests_this_window, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn required_delay_counts_down_from_last_request() {
        let mut rate = policy(50);
        assert_eq!(rate.required_delay(), Duration::ZERO);

        rate.record_request();
        assert_eq!(rate.required_delay(), Duration::from_millis(5000));

        tokio::time::advance(Duration::from_millis(2000)).await;
        assert_eq!(rate.required_delay(), Duration::from_millis(3000));

        tokio::time::advance(Duration::from_millis(10_000)).await;
        assert_eq!(rate.required_delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn mark_completed_restarts_pacing_without_counting() {
        let mut rate = policy(50);
        rate.mark_completed();
        assert_eq!(rate.required_delay(), Duration::from_millis(5000));
        assert_eq!(rate.snapshot().requests_this_window, 0);
    }

    #[test]
    fn backoff_is_linear() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.backoff(1), Duration::from_millis(5000));
        assert_eq!(retry.backoff(2), Duration::from_millis(10_000));
        assert_eq!(retry.max_attempts, 2);
    }
}
