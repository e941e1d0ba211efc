//! The player-controlled avatar

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// The falling square the player steers with jumps.
///
/// Only `y` and `velocity` change during a run; `x` is fixed at spawn. No
/// bounds are enforced here, leaving the playfield is the simulation's call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: IVec2,
    /// Vertical velocity (pixels/tick, negative is up)
    pub velocity: i32,
    pub size: i32,
}

impl Avatar {
    pub fn new(spawn: IVec2, size: i32) -> Self {
        Self {
            pos: spawn,
            velocity: 0,
            size,
        }
    }

    /// Integrate one tick: move by the current velocity, then accelerate
    pub fn apply_gravity(&mut self, gravity: i32) {
        self.pos.y = self.pos.y.saturating_add(self.velocity);
        self.velocity = self.velocity.saturating_add(gravity);
    }

    /// Replace the vertical velocity with the jump impulse
    pub fn jump(&mut self, impulse: i32) {
        self.velocity = impulse;
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}
