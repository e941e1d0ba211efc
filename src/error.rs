//! Error types
//!
//! The simulation itself is total; the only way to fail is a bad configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`{field}` must be positive (got {value})")]
    NonPositive { field: &'static str, value: i32 },
    #[error("`{field}` is out of range (got {value}, limit {limit})")]
    OutOfRange {
        field: &'static str,
        value: i64,
        limit: i64,
    },
    #[error("`ground_height` must not be negative (got {0})")]
    NegativeGround(i32),
    #[error("`obstacle_spacing` must not be negative (got {0})")]
    NegativeSpacing(i32),
    #[error("`jump_impulse` must point upward (negative), got {0}")]
    InvalidJumpImpulse(i32),
    #[error("at least one obstacle is required")]
    NoObstacles,
    #[error(
        "gap of {gap_size}px does not fit a {playfield_height}px playfield with a {ground_height}px ground"
    )]
    EmptyGapRange {
        gap_size: i32,
        playfield_height: i32,
        ground_height: i32,
    },
    #[error("avatar spawn at y={y} (size {size}) is outside the playable band 0..{ground_y}")]
    SpawnOutsidePlayfield { y: i32, size: i32, ground_y: i32 },
    #[error("could not read config file")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file")]
    Parse(#[from] serde_json::Error),
}
