//! Tick clock with fast-drop cadence.
//!
//! The clock fires once per time unit, or twenty times as fast while the
//! fast-drop flag is held. A cadence change is cancel-and-restart: the
//! pending countdown is discarded and a fresh interval starts at the new
//! rate. Re-arming at an unchanged cadence is a no-op so that callers can
//! sync the flag every loop iteration without starving ticks.

use std::time::{Duration, Instant};

use blockfall_types::FAST_DROP_DIVISOR;

/// The tick interval for a cadence.
pub fn tick_interval(base: Duration, fast_drop: bool) -> Duration {
    if fast_drop {
        base / FAST_DROP_DIVISOR
    } else {
        base
    }
}

/// Deadline-based tick source for the driving loop.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    base: Duration,
    fast_drop: bool,
    deadline: Instant,
}

impl TickClock {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            fast_drop: false,
            deadline: Instant::now() + base,
        }
    }

    /// The currently active interval.
    pub fn interval(&self) -> Duration {
        tick_interval(self.base, self.fast_drop)
    }

    /// Sync the cadence with the fast-drop flag.
    ///
    /// No-op while the flag is unchanged; otherwise the pending countdown is
    /// cancelled and restarted at the new interval.
    pub fn rearm(&mut self, fast_drop: bool) {
        if self.fast_drop == fast_drop {
            return;
        }
        self.fast_drop = fast_drop;
        self.deadline = Instant::now() + self.interval();
    }

    /// Time left until the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    pub fn due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Schedule the next tick after one has fired.
    pub fn advance(&mut self) {
        self.deadline += self.interval();
    }
}
