//! The game session: phase state machine, scoring and snapshots.
//!
//! The session is the only owner of game state.  It changes in exactly two
//! ways: [`GameSession::on_action`] for player input and
//! [`GameSession::tick`] for one fixed simulation step.  Both run to
//! completion; calls made in a phase where they mean nothing are no-ops.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compute::{apply_impulse, collides, integrate_bird};
use crate::config::GameConfig;
use crate::entities::{Bird, ObstacleView, Phase, Snapshot};
use crate::error::ConfigResult;
use crate::stream::ObstacleStream;

/// Ticks each wing animation frame is shown for.
const WING_FRAME_TICKS: u64 = 5;
const WING_FRAMES: u64 = 3;

#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    config: GameConfig,
    phase: Phase,
    score: u32,
    best_score: u32,
    /// Playing ticks since the last reset.
    frame: u64,
    bird: Bird,
    stream: ObstacleStream,
    rng: R,
}

impl GameSession<StdRng> {
    /// Build a session whose gap sequence is fixed by `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> ConfigResult<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Validate `config` and build an idle session drawing gaps from `rng`.
    pub fn new(config: GameConfig, rng: R) -> ConfigResult<Self> {
        let stream = ObstacleStream::new(&config)?;
        let bird = new_bird(&config);
        Ok(GameSession {
            config,
            phase: Phase::Idle,
            score: 0,
            best_score: 0,
            frame: 0,
            bird,
            stream,
            rng,
        })
    }

    /// Handle one press of the primary action.
    pub fn on_action(&mut self) {
        match self.phase {
            Phase::Idle | Phase::GameOver => self.reset(),
            Phase::Playing => apply_impulse(&mut self.bird, self.config.jump_strength),
        }
    }

    /// Advance the simulation by one fixed step.  Does nothing unless the
    /// session is playing.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.frame += 1;

        integrate_bird(&mut self.bird, self.config.gravity);

        let retired = self.stream.advance();
        self.score += retired;
        self.best_score = self.best_score.max(self.score);

        self.stream.spawn_if_due(&mut self.rng);
        self.stream.mark_passed(self.bird.x);

        if collides(&self.bird.rect(), self.stream.iter(), self.config.play_height) {
            self.phase = Phase::GameOver;
            tracing::info!(score = self.score, frame = self.frame, "game over");
        }
    }

    /// Start a fresh run: zero score, centred bird, one new obstacle.
    fn reset(&mut self) {
        let previous = self.phase;
        self.score = 0;
        self.frame = 0;
        self.bird = new_bird(&self.config);
        self.stream.clear();
        self.stream.spawn(&mut self.rng);
        self.phase = Phase::Playing;
        tracing::info!(from = ?previous, "session started");
    }

    pub fn snapshot(&self) -> Snapshot {
        let play_height = self.config.play_height;
        Snapshot {
            phase: self.phase,
            score: self.score,
            best_score: self.best_score,
            bird: self.bird.rect(),
            wing_frame: ((self.frame / WING_FRAME_TICKS) % WING_FRAMES) as u8,
            obstacles: self
                .stream
                .iter()
                .map(|obstacle| ObstacleView {
                    top: obstacle.top_rect(),
                    bottom: obstacle.bottom_rect(play_height),
                    passed: obstacle.passed,
                })
                .collect(),
            play_width: self.config.play_width,
            play_height,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn new_bird(config: &GameConfig) -> Bird {
    Bird::centered(
        config.bird_x,
        config.bird_width,
        config.bird_height,
        config.play_height,
    )
}
