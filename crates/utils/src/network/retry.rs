//! Retry logic for operations rejected by upstream rate limiting.

use super::rate_limit::RateLimitConfig;
use rand::Rng;
use rolegate_core::{constants, Error};
use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Substrings that mark an error as an upstream rate-limit rejection
const RATE_LIMIT_MARKERS: &[&str] = &["too many requests", "rate limit", "429"];

/// The parts of a failed upstream call the retry logic inspects
pub trait UpstreamFailure {
    /// Human readable message of the failure
    fn failure_message(&self) -> Cow<'_, str>;

    /// HTTP status text, when the failure came from an HTTP response
    fn status_text(&self) -> Option<&str> {
        None
    }

    /// Delay requested by the upstream through `Retry-After`
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl UpstreamFailure for Error {
    fn failure_message(&self) -> Cow<'_, str> {
        match self {
            Error::Upstream { message, .. } => Cow::Borrowed(message),
            other => Cow::Owned(other.to_string()),
        }
    }

    fn status_text(&self) -> Option<&str> {
        match self {
            Error::Upstream { status_text, .. } => status_text.as_deref(),
            _ => None,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::Upstream { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Whether `error` looks like an upstream rate-limit rejection.
///
/// Matches the message and status text case-insensitively against
/// "too many requests", "rate limit" and "429".
pub fn is_rate_limit_error<E>(error: &E) -> bool
where
    E: UpstreamFailure + ?Sized,
{
    let message = error.failure_message().to_lowercase();
    let status = error
        .status_text()
        .map(str::to_lowercase)
        .unwrap_or_default();

    RATE_LIMIT_MARKERS
        .iter()
        .any(|marker| message.contains(marker) || status.contains(marker))
}

/// Parse a `Retry-After` header value given in seconds.
///
/// HTTP-date values and negative numbers are not supported and yield `None`.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    if seconds.is_finite() && seconds >= 0.0 {
        Some(Duration::from_secs_f64(seconds))
    } else {
        None
    }
}

/// Backoff settings for rate-limited operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Delay before the first retry, doubled for each further retry
    pub base_delay: Duration,
    /// Ceiling for a computed backoff delay
    pub max_delay: Duration,
    /// Upper bound of the random jitter added to each backoff delay
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RateLimitConfig::default())
    }
}

impl RetryPolicy {
    /// Derive the policy for a scheduler, using its retry delay as base
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            max_retries: constants::MAX_RATE_LIMIT_RETRIES,
            base_delay: config.retry_after,
            max_delay: Duration::from_millis(constants::MAX_BACKOFF_MS),
            max_jitter: Duration::from_millis(constants::MAX_JITTER_MS),
        }
    }

    /// Exponential backoff with jitter for a zero-based retry `attempt`
    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        let factor = u32::try_from(attempt)
            .ok()
            .and_then(|exp| 2u32.checked_pow(exp))
            .unwrap_or(u32::MAX);
        let exponential = self.base_delay.saturating_mul(factor);

        let jitter_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        let jitter = if jitter_ms > 0 {
            Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
        } else {
            Duration::ZERO
        };

        exponential.saturating_add(jitter).min(self.max_delay)
    }

    /// Delay before retrying after `error`: the upstream's `Retry-After`
    /// when given, otherwise [`backoff_delay`](Self::backoff_delay)
    pub fn delay_for<E>(&self, error: &E, attempt: usize) -> Duration
    where
        E: UpstreamFailure + ?Sized,
    {
        error
            .retry_after()
            .unwrap_or_else(|| self.backoff_delay(attempt))
    }
}

/// Run `operation`, retrying it while it fails with a rate-limit error.
///
/// Any other error is returned at once. When the retries run out the last
/// rate-limit error is returned unchanged.
pub async fn execute_with_retry<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: UpstreamFailure,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    log::info!("Operation succeeded after {attempt} retries");
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt < policy.max_retries && is_rate_limit_error(&error) {
                    let delay = policy.delay_for(&error, attempt);
                    log::warn!(
                        "Rate limited (attempt {}/{}), retrying in {:?}: {}",
                        attempt + 1,
                        policy.max_retries + 1,
                        delay,
                        error.failure_message()
                    );
                    sleep(delay).await;
                    attempt += 1;
                } else {
                    if attempt > 0 {
                        log::debug!(
                            "Giving up after {} attempts: {}",
                            attempt + 1,
                            error.failure_message()
                        );
                    }
                    return Err(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    #[test]
    fn test_rate_limit_classification() {
        assert!(is_rate_limit_error(&Error::upstream("Too Many Requests")));
        assert!(is_rate_limit_error(&Error::upstream("Global Rate Limit exceeded")));
        assert!(is_rate_limit_error(&Error::upstream("request failed with status 429")));
        assert!(is_rate_limit_error(&Error::upstream_status(
            "Request failed",
            "Too Many Requests",
            None
        )));

        assert!(!is_rate_limit_error(&Error::upstream("Not found")));
        assert!(!is_rate_limit_error(&Error::upstream_status(
            "Request failed",
            "Unauthorized",
            None
        )));
    }

    #[test]
    fn test_non_upstream_errors_are_classified_by_display() {
        assert!(is_rate_limit_error(&Error::configuration("rate limit misconfigured")));
        assert!(!is_rate_limit_error(&Error::configuration("missing domain")));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("3"), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after(" 1.5 "), Some(Duration::from_millis(1500)));
        assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
        assert_eq!(parse_retry_after("-1"), None);
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after("NaN"), None);
    }

    #[test]
    fn test_backoff_doubles_with_bounded_jitter() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(100),
            ..RetryPolicy::default()
        };

        for attempt in 0..3 {
            let floor = Duration::from_millis(100 * 2u64.pow(attempt as u32));
            let delay = policy.backoff_delay(attempt);
            assert!(delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
            assert!(delay < floor + Duration::from_secs(1));
        }
    }

    #[test]
    fn test_backoff_jitter_varies() {
        let policy = RetryPolicy::default();
        let delays: HashSet<Duration> = (0..20).map(|_| policy.backoff_delay(0)).collect();
        assert!(delays.len() > 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy {
            base_delay: Duration::from_secs(10),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(30));
        assert_eq!(policy.backoff_delay(usize::MAX), Duration::from_secs(30));
    }

    #[test]
    fn test_backoff_without_jitter_is_exact() {
        let policy = RetryPolicy {
            base_delay: Duration::from_millis(250),
            max_jitter: Duration::ZERO,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_after_takes_precedence() {
        let policy = RetryPolicy::default();
        let err = Error::upstream_status(
            "Slow down",
            "Too Many Requests",
            Some(Duration::from_secs(7)),
        );
        assert_eq!(policy.delay_for(&err, 2), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_rate_limit() {
        let policy = RetryPolicy::default();
        let counter = Arc::new(AtomicUsize::new(0));

        let result = execute_with_retry(&policy, || {
            let count = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if count < 2 {
                    Err(Error::upstream("429 Too Many Requests"))
                } else {
                    Ok("users")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "users");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let counter = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();

        let result: Result<(), Error> = execute_with_retry(&policy, || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::upstream("Not found")) }
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "Not found");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
