//! Request queue and drain loop.

use super::config::RateLimitConfig;
use super::types::SchedulerStats;
use super::window::{Reservation, WindowState};
use crate::network::retry::{execute_with_retry, RetryPolicy, UpstreamFailure};
use futures::future::{BoxFuture, FutureExt};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rolegate_core::{Error, Result};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{sleep, Instant};

/// A queued operation, type-erased down to "run it and report back"
type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

static MANAGEMENT_API: OnceCell<RequestScheduler> = OnceCell::new();

/// Install the process-wide management API scheduler with `config`.
///
/// Must run before the first call to [`management_api_scheduler`]; the
/// scheduler cannot be replaced afterwards, so every caller shares one
/// window against the upstream.
pub fn init_management_api_scheduler(
    config: RateLimitConfig,
) -> Result<&'static RequestScheduler> {
    let scheduler = RequestScheduler::new(config)?;
    MANAGEMENT_API.try_insert(scheduler).map_err(|_| {
        Error::configuration("the management API scheduler is already initialized")
    })
}

/// The scheduler shared by every call to the identity management API.
///
/// Uses [`RateLimitConfig::default`] unless
/// [`init_management_api_scheduler`] ran first.
pub fn management_api_scheduler() -> &'static RequestScheduler {
    MANAGEMENT_API.get_or_init(|| RequestScheduler::build(RateLimitConfig::default()))
}

/// Queue and window state, only touched under the scheduler's lock
struct SchedulerState {
    queue: VecDeque<Job>,
    window: WindowState,
    draining: bool,
    dispatched_total: u64,
}

struct Shared {
    config: RateLimitConfig,
    retry: RetryPolicy,
    state: Mutex<SchedulerState>,
}

/// Throttles and retries asynchronous operations.
///
/// Cloning is cheap and every clone feeds the same queue and window. At
/// most one drain loop runs per scheduler; it is started by
/// [`execute`](Self::execute) when none is active and exits once the queue
/// is empty.
#[derive(Clone)]
pub struct RequestScheduler {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for RequestScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScheduler")
            .field("config", &self.shared.config)
            .field("stats", &self.stats())
            .finish()
    }
}

impl RequestScheduler {
    /// Create a scheduler after validating `config`
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RateLimitConfig) -> Self {
        let state = SchedulerState {
            queue: VecDeque::new(),
            window: WindowState::new(Instant::now()),
            draining: false,
            dispatched_total: 0,
        };

        Self {
            shared: Arc::new(Shared {
                config,
                retry: RetryPolicy::from_config(&config),
                state: Mutex::new(state),
            }),
        }
    }

    /// The limits this scheduler enforces
    pub fn config(&self) -> &RateLimitConfig {
        &self.shared.config
    }

    /// The retry policy applied to rate-limited operations
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.shared.retry
    }

    /// Queue `operation` and return a future for its final result.
    ///
    /// The operation is queued before this returns, so submission order is
    /// dispatch order no matter when, or whether, the returned future is
    /// polled. It is dispatched once the window has room. Rate-limit errors
    /// are retried according to [`retry_policy`](Self::retry_policy); any
    /// other error, or the last rate-limit error once retries run out, is
    /// returned as the operation produced it. Dropping the future does not
    /// cancel the operation.
    ///
    /// Must be called within a tokio runtime. If the operation can no
    /// longer report back (it panicked, or the runtime shut down) the caller
    /// receives [`Error::Scheduler`] converted into `E`.
    pub fn execute<F, Fut, T, E>(
        &self,
        operation: F,
    ) -> impl Future<Output = std::result::Result<T, E>> + Send + 'static
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: UpstreamFailure + From<Error> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let retry = self.shared.retry.clone();

        let job: Job = Box::new(move || {
            async move {
                let result = execute_with_retry(&retry, operation).await;
                if tx.send(result).is_err() {
                    tracing::trace!("caller stopped waiting for a scheduled request");
                }
            }
            .boxed()
        });

        self.enqueue(job);

        async move {
            match rx.await {
                Ok(result) => result,
                Err(_) => Err(E::from(Error::scheduler(
                    "scheduled request ended without a result",
                ))),
            }
        }
    }

    /// Current queue and window statistics
    pub fn stats(&self) -> SchedulerStats {
        let state = self.shared.state.lock();
        SchedulerStats {
            queued: state.queue.len(),
            requests_in_window: state.window.request_count(),
            draining: state.draining,
            dispatched_total: state.dispatched_total,
        }
    }

    fn enqueue(&self, job: Job) {
        let start_drain = {
            let mut state = self.shared.state.lock();
            state.queue.push_back(job);
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            tokio::spawn(drain(Arc::clone(&self.shared)));
        }
    }
}

/// Clears the draining flag if the drain task is dropped mid-loop, so a
/// later submission can start a new one
struct DrainGuard {
    shared: Arc<Shared>,
    finished: bool,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        if !self.finished {
            self.shared.state.lock().draining = false;
        }
    }
}

enum Step {
    Dispatch(Job),
    Wait(std::time::Duration),
    Done,
}

async fn drain(shared: Arc<Shared>) {
    let mut guard = DrainGuard {
        shared,
        finished: false,
    };

    loop {
        let step = {
            let mut state = guard.shared.state.lock();
            match state.queue.pop_front() {
                None => {
                    state.draining = false;
                    Step::Done
                }
                Some(job) => {
                    let now = Instant::now();
                    match state.window.try_reserve(now, &guard.shared.config) {
                        Reservation::Granted => {
                            state.dispatched_total += 1;
                            Step::Dispatch(job)
                        }
                        Reservation::Wait(delay) => {
                            state.queue.push_front(job);
                            Step::Wait(delay)
                        }
                    }
                }
            }
        };

        match step {
            Step::Dispatch(job) => {
                tokio::spawn(job());
            }
            Step::Wait(delay) => {
                tracing::debug!(
                    delay_ms = delay.as_millis() as u64,
                    max_requests = guard.shared.config.max_requests,
                    "rate limit window full, waiting"
                );
                sleep(delay).await;
            }
            Step::Done => {
                guard.finished = true;
                return;
            }
        }
    }
}
