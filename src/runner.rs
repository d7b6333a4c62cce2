//! Drives a [`GameSession`] from a [`TickSchedule`].
//!
//! The schedule is armed on every transition into `Playing` and cancelled
//! as soon as the session leaves it, so no ticks are delivered while the
//! game is over.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;

use crate::entities::{Phase, Snapshot};
use crate::schedule::{ScheduleHandle, TickSchedule};
use crate::session::GameSession;

#[derive(Debug)]
pub struct GameRunner<R = StdRng> {
    session: GameSession<R>,
    schedule: TickSchedule,
    handle: Option<ScheduleHandle>,
}

impl<R: Rng> GameRunner<R> {
    pub fn new(session: GameSession<R>) -> Self {
        let schedule = TickSchedule::new(session.config().tick_interval());
        GameRunner {
            session,
            schedule,
            handle: None,
        }
    }

    /// Forward one primary action; (re)arm the schedule if play just began.
    pub fn on_action(&mut self, now: Instant) {
        let was_playing = self.session.phase() == Phase::Playing;
        self.session.on_action();
        if !was_playing && self.session.phase() == Phase::Playing {
            self.handle = Some(self.schedule.start(now));
        }
    }

    /// Run every tick due by `now`.  Returns the number of ticks run.
    pub fn pump(&mut self, now: Instant) -> u32 {
        let due = self.schedule.poll(now);
        let mut ran = 0;
        for _ in 0..due {
            self.session.tick();
            ran += 1;
            if self.session.phase() != Phase::Playing {
                self.stop();
                break;
            }
        }
        ran
    }

    /// Cancel any pending ticks.  Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.schedule.cancel();
        self.handle = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Handle of the live tick stream, if one is armed.
    pub fn handle(&self) -> Option<ScheduleHandle> {
        self.handle
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.next_deadline()
    }
}
