//! Flappy Sim - fixed-step core of a side-scrolling gap-obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `driver`: Fixed-interval scheduling and input queueing
//! - `config`: Data-driven tuning, validated before a run starts
//!
//! Windowing, input devices and pixel rendering live outside this crate; they
//! feed [`driver::Command`]s in and read [`sim::Snapshot`]s out.

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;

pub use config::{Config, Tuning};
pub use driver::{Command, Driver, InputHandle};
pub use error::ConfigError;

/// Game configuration constants (defaults for [`Config`])
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (50 Hz)
    pub const TICK_MS: u64 = 20;
    pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS);
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on
    pub const MAX_FRAME: Duration = Duration::from_millis(100);

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: i32 = 800;
    pub const PLAYFIELD_HEIGHT: i32 = 600;
    pub const GROUND_HEIGHT: i32 = 50;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: i32 = 100;
    pub const GAP_SIZE: i32 = 200;
    /// Horizontal space between neighbouring obstacles at spawn
    pub const OBSTACLE_SPACING: i32 = 200;
    pub const OBSTACLE_COUNT: usize = 5;
    /// Scroll speed (pixels/tick)
    pub const SCROLL_SPEED: i32 = 5;

    /// Avatar defaults
    pub const AVATAR_SIZE: i32 = 30;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: i32 = 1;
    /// Velocity set by a jump (pixels/tick, negative is up)
    pub const JUMP_IMPULSE: i32 = -10;

    /// Largest magnitude accepted for any pixel length or per-tick rate.
    /// Keeps every derived coordinate comfortably inside `i32`.
    pub const MAX_DIMENSION: i32 = 1 << 16;
    /// Largest obstacle row accepted
    pub const MAX_OBSTACLES: usize = 1024;
}
