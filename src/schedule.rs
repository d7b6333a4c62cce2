//! Fixed-interval tick schedule with explicit start and cancel.
//!
//! The caller supplies the current [`Instant`] on every call, so the
//! schedule itself never reads a clock.  Starting always invalidates the
//! previous handle first: at most one tick stream is armed at a time.

use std::time::{Duration, Instant};

/// Most ticks a single [`TickSchedule::poll`] will report.  A caller that
/// falls further behind is re-synced rather than replaying the backlog.
pub const MAX_CATCH_UP: u32 = 5;

/// Identifies one `start` of a [`TickSchedule`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleHandle(u64);

impl ScheduleHandle {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Armed {
    generation: u64,
    next_due: Instant,
}

#[derive(Clone, Debug)]
pub struct TickSchedule {
    interval: Duration,
    generation: u64,
    armed: Option<Armed>,
}

impl TickSchedule {
    pub fn new(interval: Duration) -> Self {
        TickSchedule {
            interval,
            generation: 0,
            armed: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the schedule with the first tick due one interval after `now`.
    /// Any previously returned handle becomes stale.
    pub fn start(&mut self, now: Instant) -> ScheduleHandle {
        self.cancel();
        self.generation += 1;
        self.armed = Some(Armed {
            generation: self.generation,
            next_due: now + self.interval,
        });
        ScheduleHandle(self.generation)
    }

    /// Stop ticking.  Cancelling a stopped schedule does nothing.
    pub fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            tracing::debug!(generation = armed.generation, "tick schedule cancelled");
        }
    }

    pub fn is_running(&self) -> bool {
        self.armed.is_some()
    }

    /// True if `handle` came from the start that is currently armed.
    pub fn is_current(&self, handle: ScheduleHandle) -> bool {
        self.armed
            .is_some_and(|armed| armed.generation == handle.generation())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.map(|armed| armed.next_due)
    }

    /// Number of ticks that have come due by `now`, at most [`MAX_CATCH_UP`].
    pub fn poll(&mut self, now: Instant) -> u32 {
        let interval = self.interval;
        let Some(armed) = self.armed.as_mut() else {
            return 0;
        };

        let mut due = 0;
        while armed.next_due <= now && due < MAX_CATCH_UP {
            armed.next_due += interval;
            due += 1;
        }
        if armed.next_due <= now {
            tracing::warn!(
                behind_ms = now.duration_since(armed.next_due).as_millis() as u64,
                "tick schedule fell behind, re-syncing"
            );
            armed.next_due = now + interval;
        }
        due
    }
}
