//! Types reported by the request scheduler.

/// Point-in-time view of a scheduler's queue and window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Operations waiting to be dispatched
    pub queued: usize,
    /// Dispatches counted against the current window
    pub requests_in_window: u32,
    /// Whether a drain loop is active
    pub draining: bool,
    /// Dispatches since the scheduler was created
    pub dispatched_total: u64,
}
