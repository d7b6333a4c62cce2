//! Errors raised while building a game session.

use std::path::PathBuf;

use thiserror::Error;

/// A game configuration that would break the simulation's invariants.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A size, speed or rate that must be strictly positive and finite.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    /// A margin that must be zero or more.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    /// A length that must be a whole number of play-area units.
    #[error("{field} must be a whole number of units, got {value}")]
    NotIntegral { field: &'static str, value: f32 },

    /// The gap does not leave room for any pipe at all.
    #[error("gap height {gap_height} must be smaller than play height {play_height}")]
    GapTooTall { gap_height: f32, play_height: f32 },

    /// `[min_margin, play_height - 2 * min_margin]` is empty.
    #[error("min margin {min_margin} leaves no room for a gap in play height {play_height}")]
    GapRangeEmpty { min_margin: f32, play_height: f32 },

    /// The lowest possible gap would run past the floor.
    #[error("gap of {gap_height} starting at {max_gap_start} overflows play height {play_height}")]
    GapOverflowsFloor {
        gap_height: f32,
        max_gap_start: f32,
        play_height: f32,
    },

    /// The bird does not fit inside the play area.
    #[error("bird {width}x{height} at x={x} does not fit a {play_width}x{play_height} play area")]
    BirdOutOfBounds {
        x: f32,
        width: f32,
        height: f32,
        play_width: f32,
        play_height: f32,
    },

    /// The bird cannot pass through the gap.
    #[error("bird height {bird_height} must be smaller than gap height {gap_height}")]
    BirdTallerThanGap { bird_height: f32, gap_height: f32 },
}

/// Result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;
