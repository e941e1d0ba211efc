//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step at a time.

use super::obstacle::GapSource;
use super::state::{CrashCause, GameEvent, Phase, Simulation};

impl<G: GapSource> Simulation<G> {
    /// Advance the world by one tick. Does nothing once the run is over.
    pub fn step(&mut self) {
        if self.phase == Phase::Over {
            return;
        }

        self.tick_count += 1;
        self.avatar.apply_gravity(self.tuning.gravity());

        let recycled = self.field.advance(&mut self.source);
        for _ in 0..recycled {
            self.score += 1;
            self.record(GameEvent::Scored { score: self.score });
        }

        if let Some(cause) = self.check_crash() {
            self.phase = Phase::Over;
            self.crash = Some(cause);
            self.record(GameEvent::Crashed {
                cause,
                score: self.score,
            });
            log::info!(
                "Game over ({:?}) after {} ticks. Score: {}",
                cause,
                self.tick_count,
                self.score
            );
        }

        log::trace!(
            "tick {}: y={} vy={} score={}",
            self.tick_count,
            self.avatar.pos.y,
            self.avatar.velocity,
            self.score
        );
    }

    /// The first crash condition that holds, if any
    fn check_crash(&self) -> Option<CrashCause> {
        let bounds = self.avatar.bounding_box();
        if self.field.collides_with(&bounds) {
            Some(CrashCause::Obstacle)
        } else if bounds.bottom() >= self.tuning.ground_y() {
            Some(CrashCause::Ground)
        } else if bounds.top() < 0 {
            Some(CrashCause::Ceiling)
        } else {
            None
        }
    }
}
