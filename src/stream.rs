//! The obstacle stream: spawning, scrolling and retiring pipe pairs.
//!
//! Obstacles are kept in spawn order, which is also left-to-right screen
//! order, so the front of the queue is always the next one to leave the
//! screen.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::Obstacle;
use crate::error::ConfigResult;

#[derive(Clone, Debug)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    play_width: f32,
    pipe_width: f32,
    gap_height: f32,
    gap_start_range: (f32, f32),
    speed: f32,
    spawn_interval: f32,
    retire_margin: f32,
}

impl ObstacleStream {
    /// An empty stream, or the reason `config` cannot drive one.
    pub fn new(config: &GameConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(ObstacleStream {
            obstacles: VecDeque::new(),
            play_width: config.play_width,
            pipe_width: config.pipe_width,
            gap_height: config.gap_height,
            gap_start_range: config.gap_start_range(),
            speed: config.pipe_speed,
            spawn_interval: config.spawn_interval,
            retire_margin: config.retire_margin,
        })
    }

    /// Append a new obstacle at the right edge with a randomly placed gap.
    ///
    /// Gap starts are whole units, so `gap_top + gap_height` is exact and the
    /// gap height never drifts.
    pub fn spawn(&mut self, rng: &mut impl Rng) {
        let (low, high) = self.gap_start_range;
        let gap_top = rng.gen_range(low as i32..=high as i32) as f32;
        tracing::debug!(gap_top, "spawning obstacle");
        self.obstacles.push_back(Obstacle {
            x: self.play_width,
            width: self.pipe_width,
            gap_top,
            gap_bottom: gap_top + self.gap_height,
            passed: false,
        });
    }

    /// True when the stream is empty or the newest obstacle has moved far
    /// enough left to make room for the next one.
    pub fn needs_spawn(&self) -> bool {
        match self.obstacles.back() {
            None => true,
            Some(last) => last.x < self.play_width - self.spawn_interval,
        }
    }

    /// Spawn if [`needs_spawn`](Self::needs_spawn); returns whether it did.
    pub fn spawn_if_due(&mut self, rng: &mut impl Rng) -> bool {
        if self.needs_spawn() {
            self.spawn(rng);
            true
        } else {
            false
        }
    }

    /// Move every obstacle one tick to the left, then retire everything at
    /// the front that is fully off screen.  Returns how many were retired.
    pub fn advance(&mut self) -> u32 {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }

        let mut retired = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|front| front.right() < -self.retire_margin)
        {
            self.obstacles.pop_front();
            retired += 1;
        }
        if retired > 0 {
            tracing::debug!(retired, remaining = self.obstacles.len(), "retired obstacles");
        }
        retired
    }

    /// Flag every obstacle whose right edge is at or behind `bird_left`.
    pub fn mark_passed(&mut self, bird_left: f32) {
        // Passed obstacles always form a prefix of the queue.
        for obstacle in self.obstacles.iter_mut() {
            if obstacle.right() > bird_left {
                break;
            }
            obstacle.passed = true;
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Leftmost obstacle, next to be retired.
    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    /// Most recently spawned obstacle.
    pub fn back(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }
}
