//! Fixed-window dispatch accounting.

use super::config::RateLimitConfig;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of asking the window for a dispatch slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    /// A slot was taken; dispatch now
    Granted,
    /// The window is full; ask again after this long
    Wait(Duration),
}

/// Dispatch count of the current fixed window.
///
/// The window restarts once `window` has fully elapsed since its start; it
/// does not slide with each dispatch.
#[derive(Debug, Clone)]
pub struct WindowState {
    request_count: u32,
    window_start: Instant,
}

impl WindowState {
    /// A fresh window starting at `now`
    pub fn new(now: Instant) -> Self {
        Self {
            request_count: 0,
            window_start: now,
        }
    }

    /// Dispatches counted in the current window
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    /// Take a dispatch slot at `now` if the window has room.
    ///
    /// Slots are reserved at dispatch time, not on completion.
    pub fn try_reserve(&mut self, now: Instant, config: &RateLimitConfig) -> Reservation {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= config.window {
            self.request_count = 0;
            self.window_start = now;
        }

        if self.request_count >= config.max_requests {
            let elapsed = now.saturating_duration_since(self.window_start);
            return Reservation::Wait(config.window.saturating_sub(elapsed));
        }

        self.request_count += 1;
        Reservation::Granted
    }
}
