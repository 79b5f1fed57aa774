//! Configuration for the request scheduler.

use rolegate_core::{constants, Error, Result};
use std::time::Duration;

/// Throughput limits of a [`RequestScheduler`](super::RequestScheduler).
///
/// Fixed for the lifetime of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Dispatches allowed per window
    pub max_requests: u32,
    /// Length of the fixed window
    pub window: Duration,
    /// Base delay for retrying a rate-limited operation
    pub retry_after: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: constants::DEFAULT_MAX_REQUESTS,
            window: Duration::from_millis(constants::DEFAULT_WINDOW_MS),
            retry_after: Duration::from_millis(constants::DEFAULT_RETRY_AFTER_MS),
        }
    }
}

impl RateLimitConfig {
    /// Create a config from millisecond values
    pub fn from_millis(max_requests: u32, window_ms: u64, retry_after_ms: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_millis(window_ms),
            retry_after: Duration::from_millis(retry_after_ms),
        }
    }

    /// Reject zero limits
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(Error::configuration(
                "rate limit max_requests must be greater than zero",
            ));
        }
        if self.window.is_zero() {
            return Err(Error::configuration(
                "rate limit window must be greater than zero",
            ));
        }
        if self.retry_after.is_zero() {
            return Err(Error::configuration(
                "rate limit retry_after must be greater than zero",
            ));
        }
        Ok(())
    }
}
