//! Bounded, fixed-delay retry policy

use crate::config::{SearchSettings, RETRIES, RETRY_DELAY_MS};
use std::time::Duration;

/// How often and how patiently a failed backend call is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Fixed wait before each retry
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(
            settings.retries,
            Duration::from_millis(settings.retry_delay_ms),
        )
    }

    /// Total number of attempts, the first one included
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether another attempt is allowed after `attempts` failed ones
    pub fn should_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RETRIES, Duration::from_millis(RETRY_DELAY_MS))
    }
}
