use std::time::{Duration, Instant};

use tracing::trace;

/// Debounce for the full-resolution render.
///
/// Holds at most one pending deadline. Every [`schedule`](Self::schedule) replaces the
/// previous one, so a burst of input produces a single render once it settles. Time is
/// supplied by the host event loop; nothing here sleeps or spawns.
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    delay: Duration,
    deadline: Option<Instant>,
    running: bool,
}

impl RenderScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stops the scheduler and drops any pending render.
    pub fn stop(&mut self) {
        self.running = false;
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancels any pending render and schedules a new one `delay` after `now`.
    /// Returns `false` while stopped.
    pub fn schedule(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if self.deadline.is_some() {
            trace!("Rescheduling pending full render");
        }
        self.deadline = Some(now + self.delay);
        true
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once when the pending deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
