//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected gap source only (seeded RNG in production)
//! - Obstacles recycled in place, never reordered
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod field;
pub mod obstacle;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use avatar::Avatar;
pub use field::ObstacleField;
pub use obstacle::{GapSource, Obstacle, ScriptedGaps};
pub use rect::Rect;
pub use state::{
    AvatarView, Command, CrashCause, GameEvent, MAX_PENDING_EVENTS, ObstacleView, Phase,
    Simulation, Snapshot,
};
