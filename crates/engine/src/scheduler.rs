//! Explicit timers owned by the engine.
//!
//! Neither timer spawns callbacks. The engine asks each timer how long until it fires,
//! feeds elapsed time in, and acts on the firing itself, so stopping or cancelling a
//! timer is immediate and nothing can fire against a board that was reset.

/// Periodic drop ticker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropScheduler {
    interval_ms: u32,
    /// Time left in the current period; `None` while stopped.
    remaining_ms: Option<u32>,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh full period. Fractional intervals round up to whole ms and
    /// anything below 1ms (NaN included) is treated as 1ms.
    pub fn start(&mut self, interval_ms: f64) {
        self.interval_ms = (interval_ms.ceil() as u32).max(1);
        self.remaining_ms = Some(self.interval_ms);
    }

    /// Cancel the pending tick. The interval is kept.
    pub fn stop(&mut self) {
        self.remaining_ms = None;
    }

    /// Stop, then start at `interval_ms`. No partial period carries over.
    pub fn restart(&mut self, interval_ms: f64) {
        self.stop();
        self.start(interval_ms);
    }

    pub fn is_running(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Milliseconds until the next tick, or None while stopped.
    pub fn until_next(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Let `elapsed_ms` pass. Returns true if a tick is due; the next period starts
    /// immediately. Callers step at most `until_next()` at a time to see every tick.
    pub fn elapse(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        if elapsed_ms >= remaining {
            self.remaining_ms = Some(self.interval_ms);
            true
        } else {
            self.remaining_ms = Some(remaining - elapsed_ms);
            false
        }
    }
}

/// One-shot cancellable step used by the line-clear cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTimer {
    remaining_ms: Option<u32>,
}

impl StepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer, replacing any pending step.
    pub fn schedule(&mut self, delay_ms: u32) {
        self.remaining_ms = Some(delay_ms);
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn until_next(&self) -> Option<u32> {
        self.remaining_ms
    }

    /// Let `elapsed_ms` pass. Returns true exactly once when the step becomes due.
    pub fn elapse(&mut self, elapsed_ms: u32) -> bool {
        let Some(remaining) = self.remaining_ms else {
            return false;
        };
        if elapsed_ms >= remaining {
            self.remaining_ms = None;
            true
        } else {
            self.remaining_ms = Some(remaining - elapsed_ms);
            false
        }
    }
}
