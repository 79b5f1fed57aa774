//! Fixed-window rate limiting for calls to the identity management API.
//!
//! Callers hand operations to a [`RequestScheduler`], which queues them and
//! dispatches them in submission order while keeping at most
//! `max_requests` dispatches inside each window. Operations rejected by the
//! upstream with a rate-limit error are retried with backoff before their
//! result reaches the caller.
//!
//! ## Architecture
//!
//! - [`config`] - [`RateLimitConfig`] and its validation
//! - [`window`] - Fixed-window accounting
//! - [`scheduler`] - Queue, drain loop and the process-wide instance
//! - [`types`] - Statistics snapshot
//!
//! ## Example
//!
//! ```rust,no_run
//! use rolegate_utils::network::rate_limit::{RateLimitConfig, RequestScheduler};
//!
//! # async fn example() -> rolegate_core::Result<()> {
//! let scheduler = RequestScheduler::new(RateLimitConfig::default())?;
//!
//! let users = scheduler
//!     .execute(|| async {
//!         // Call the management API here
//!         Ok::<_, rolegate_core::Error>(vec!["auth0|42".to_string()])
//!     })
//!     .await?;
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod scheduler;
pub mod types;
pub mod window;

pub use config::RateLimitConfig;
pub use scheduler::{init_management_api_scheduler, management_api_scheduler, RequestScheduler};
pub use types::SchedulerStats;
