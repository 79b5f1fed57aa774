//! Network-related utilities.
//!
//! This module provides tools for managing calls to the identity management
//! API: a fixed-window rate limiter that queues excess requests, and retry
//! logic that backs off when the API answers with a rate-limit rejection.
//!
//! ## Key Components
//!
//! - **`rate_limit`**: The [`RequestScheduler`](rate_limit::RequestScheduler),
//!   its configuration and the process-wide instance.
//! - **`retry`**: Rate-limit error classification and exponential backoff
//!   with jitter for a single operation.

pub mod rate_limit;
pub mod retry;

pub use rate_limit::{
    init_management_api_scheduler, management_api_scheduler, RateLimitConfig, RequestScheduler,
    SchedulerStats,
};
pub use retry::{
    execute_with_retry, is_rate_limit_error, parse_retry_after, RetryPolicy, UpstreamFailure,
};
