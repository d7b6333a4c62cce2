/// Tunable game constants, loadable from TOML.
///
/// Every field has a default matching the classic 300x400 layout, so a
/// config file only needs the keys it changes.  All values are validated
/// once, up front; a session is never built from a config that could break
/// the gap or bounds invariants at runtime.
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub play_width: f32,
    pub play_height: f32,
    /// Added to the bird's vertical velocity every tick.
    pub gravity: f32,
    /// Upward speed a flap resets the bird to.
    pub jump_strength: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub pipe_width: f32,
    /// Vertical opening between the top and bottom pipe.
    pub gap_height: f32,
    /// Smallest allowed distance from the ceiling to a gap.
    pub min_margin: f32,
    /// Leftward pipe movement per tick.
    pub pipe_speed: f32,
    /// Horizontal distance between consecutive spawns.
    pub spawn_interval: f32,
    /// How far past the left edge a pipe's right side must be before it
    /// is retired.
    pub retire_margin: f32,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            play_width: 300.0,
            play_height: 400.0,
            gravity: 0.5,
            jump_strength: 8.5,
            bird_x: 50.0,
            bird_width: 50.0,
            bird_height: 50.0,
            pipe_width: 50.0,
            gap_height: 150.0,
            min_margin: 100.0,
            pipe_speed: 3.0,
            spawn_interval: 200.0,
            retire_margin: 0.0,
            tick_interval_ms: 15,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive {
            field,
            value: f64::from(value),
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Whole numbers up to 2^24 are exact in f32.
const MAX_EXACT_UNITS: f32 = 16_777_216.0;

fn require_integral(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_UNITS {
        Ok(())
    } else {
        Err(ConfigError::NotIntegral { field, value })
    }
}

impl GameConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("play_width", self.play_width)?;
        require_positive("play_height", self.play_height)?;
        require_positive("gravity", self.gravity)?;
        require_positive("jump_strength", self.jump_strength)?;
        require_positive("bird_width", self.bird_width)?;
        require_positive("bird_height", self.bird_height)?;
        require_positive("pipe_width", self.pipe_width)?;
        require_positive("gap_height", self.gap_height)?;
        require_positive("pipe_speed", self.pipe_speed)?;
        require_positive("spawn_interval", self.spawn_interval)?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_interval_ms",
                value: 0.0,
            });
        }
        require_non_negative("min_margin", self.min_margin)?;
        require_non_negative("retire_margin", self.retire_margin)?;
        require_non_negative("bird_x", self.bird_x)?;
        // Gap edges are sums of these; whole units keep them exact.
        require_integral("play_height", self.play_height)?;
        require_integral("gap_height", self.gap_height)?;
        require_integral("min_margin", self.min_margin)?;

        if self.gap_height >= self.play_height {
            return Err(ConfigError::GapTooTall {
                gap_height: self.gap_height,
                play_height: self.play_height,
            });
        }
        let (min_start, max_start) = self.gap_start_range();
        if min_start > max_start {
            return Err(ConfigError::GapRangeEmpty {
                min_margin: self.min_margin,
                play_height: self.play_height,
            });
        }
        if max_start + self.gap_height > self.play_height {
            return Err(ConfigError::GapOverflowsFloor {
                gap_height: self.gap_height,
                max_gap_start: max_start,
                play_height: self.play_height,
            });
        }
        if self.bird_x + self.bird_width > self.play_width || self.bird_height >= self.play_height {
            return Err(ConfigError::BirdOutOfBounds {
                x: self.bird_x,
                width: self.bird_width,
                height: self.bird_height,
                play_width: self.play_width,
                play_height: self.play_height,
            });
        }
        if self.bird_height >= self.gap_height {
            return Err(ConfigError::BirdTallerThanGap {
                bird_height: self.bird_height,
                gap_height: self.gap_height,
            });
        }
        Ok(())
    }

    /// Inclusive range a new gap's top edge is drawn from.
    pub fn gap_start_range(&self) -> (f32, f32) {
        (self.min_margin, self.play_height - 2.0 * self.min_margin)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Height gained by a single flap from rest, in discrete ticks.
    ///
    /// The bird rises on every tick whose velocity `k * gravity - jump` is
    /// still negative.  Zero when gravity or jump strength is not usable.
    pub fn flap_rise(&self) -> f32 {
        let (gravity, jump) = (f64::from(self.gravity), f64::from(self.jump_strength));
        if !(gravity > 0.0 && gravity.is_finite() && jump > 0.0 && jump.is_finite()) {
            return 0.0;
        }
        let rising_ticks = (jump / gravity).ceil() - 1.0;
        (rising_ticks * jump - gravity * rising_ticks * (rising_ticks + 1.0) / 2.0) as f32
    }

    /// Ticks between two consecutive pipes reaching the bird.
    pub fn ticks_between_spawns(&self) -> f32 {
        self.spawn_interval / self.pipe_speed
    }

    /// Largest vertical jump between the gaps of two neighbouring pipes.
    pub fn max_gap_shift(&self) -> f32 {
        let (min_start, max_start) = self.gap_start_range();
        max_start - min_start
    }
}
