//! Owned, cancellable repeating task driving the engine poll.

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Interval;

/// Poll timer. Stops at most once; a stopped timer never starts again.
/// Dropping it cancels the underlying interval.
#[derive(Default)]
pub struct PollTimer {
    interval: RefCell<Option<Interval>>,
    stopped: Cell<bool>,
}

impl PollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_tick` every `period_ms` until [`PollTimer::stop`].
    /// Replaces a running interval; ignored once stopped.
    pub fn start<F>(&self, period_ms: u32, on_tick: F)
    where
        F: FnMut() + 'static,
    {
        if self.stopped.get() {
            return;
        }
        self.interval
            .replace(Some(Interval::new(period_ms, on_tick)));
    }

    /// Cancel the interval. Returns true only for the call that stopped it.
    pub fn stop(&self) -> bool {
        if self.stopped.replace(true) {
            return false;
        }
        let interval = self.interval.borrow_mut().take();
        // Dropping the interval clears it and releases the callback.
        drop(interval);
        true
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    pub fn is_running(&self) -> bool {
        self.interval.borrow().is_some()
    }
}

impl std::fmt::Debug for PollTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollTimer")
            .field("running", &self.is_running())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
