//! Delayed-transition scheduling
//!
//! The state machine asks for timers through `Effect::Schedule` and
//! `Effect::Cancel`; a `Scheduler` makes them happen. Browsers use
//! `setTimeout`, everything else uses the virtual clock below.

use super::state::TimerId;

/// Runs delayed transitions for a session
pub trait Scheduler {
    /// Arrange for `id` to be fired after `delay_ms`
    fn schedule(&mut self, id: TimerId, delay_ms: u32);
    /// Forget `id`; cancelling an unknown or fired timer is a no-op
    fn cancel(&mut self, id: TimerId);
}

/// Virtual clock driven by the host (native runs, tests)
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now_ms: u64,
    /// (due time, id)
    pending: Vec<(u64, TimerId)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(_, pid)| *pid == id)
    }

    /// Move the clock forward and return the timers that came due, earliest first
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now_ms += ms;
        let now = self.now_ms;
        let mut due: Vec<(u64, TimerId)> = self.pending.iter().copied().filter(|(at, _)| *at <= now).collect();
        self.pending.retain(|(at, _)| *at > now);
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, id: TimerId, delay_ms: u32) {
        self.pending.push((self.now_ms + delay_ms as u64, id));
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(_, pid)| *pid != id);
    }
}
