//! Retry policy for REST reads.

use std::time::Duration;

/// How the REST transport retries a failed `list` or `get`.
///
/// Writes are never retried: a `POST` that timed out may still have created
/// the record. Reads are retried on `429`, 5xx, timeouts and connection
/// failures. A `Retry-After` header overrides the computed delay.
///
/// The delay doubles after each attempt, up to `max_delay`. A list fetch
/// superseded during a backoff is dropped with it.
///
/// Retries are off by default: a list view shows the error with a refresh
/// action instead.
///
/// ```rust
/// use shopdesk::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new()
///     .with_max_retries(2)
///     .with_initial_delay(Duration::from_millis(250));
/// assert!(config.is_enabled());
/// assert!(!RetryConfig::disabled().is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Cap on any single delay.
    pub max_delay: Duration,

    /// Random spread of each delay, `0.0..=1.0`.
    pub jitter: f64,

    /// Also retry timeouts and refused connections.
    pub retry_network_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            jitter: 0.1,
            retry_network_errors: true,
        }
    }
}

impl RetryConfig {
    /// Three retries starting at 100ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Sets the number of retries.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the first delay.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the delay cap.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Sets whether network errors are retried.
    #[must_use]
    pub fn with_retry_network_errors(mut self, retry: bool) -> Self {
        self.retry_network_errors = retry;
        self
    }

    /// Delay before retry `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let Some(doublings) = attempt.checked_sub(1) else {
            return Duration::ZERO;
        };

        let factor = 2f64.powi(i32::try_from(doublings).unwrap_or(i32::MAX));
        let delay = (self.initial_delay.as_secs_f64() * factor).min(self.max_delay.as_secs_f64());
        let spread = delay * self.jitter * (fastrand::f64() * 2.0 - 1.0);

        Duration::from_secs_f64((delay + spread).max(0.0))
    }

    /// Returns `true` if at least one retry is allowed.
    pub fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }
}
