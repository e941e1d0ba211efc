//! Game state and core simulation types
//!
//! A `Simulation` is the only mutable game state. Everything the
//! presentation layer needs is copied out through [`Simulation::snapshot`].

use std::collections::VecDeque;
use std::collections::vec_deque::Drain;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::field::ObstacleField;
use super::obstacle::GapSource;
use super::rect::Rect;
use crate::config::{Config, Tuning};
use crate::error::ConfigError;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ticks advance the world
    Running,
    /// Run ended; only a restart does anything
    Over,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Obstacle,
    Ground,
    Ceiling,
}

/// Discrete inputs the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    Restart,
}

/// Things that happened during a step or restart, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An obstacle was recycled; `score` is the new total
    Scored { score: u64 },
    /// The run just ended
    Crashed { cause: CrashCause, score: u64 },
    /// A fresh run started
    Restarted,
}

/// Avatar fields as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarView {
    pub x: i32,
    pub y: i32,
    pub velocity: i32,
    pub size: i32,
}

/// Obstacle fields as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: i32,
    pub gap_top: i32,
    pub top: Rect,
    pub bottom: Rect,
}

/// An owned, consistent copy of the state between two ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub score: u64,
    pub phase: Phase,
    pub crash: Option<CrashCause>,
    pub avatar: AvatarView,
    pub obstacles: Vec<ObstacleView>,
    pub playfield_width: i32,
    pub playfield_height: i32,
    pub ground_height: i32,
}

impl Snapshot {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> i32 {
        self.playfield_height - self.ground_height
    }
}

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// One game: avatar, obstacles, score and phase.
///
/// Events queue up until [`Simulation::drain_events`] is called. Callers that
/// never drain only keep the newest [`MAX_PENDING_EVENTS`].
#[derive(Debug, Clone)]
pub struct Simulation<G = Pcg32> {
    pub(super) tuning: Tuning,
    pub(super) source: G,
    pub(super) avatar: Avatar,
    pub(super) field: ObstacleField,
    pub(super) score: u64,
    pub(super) phase: Phase,
    pub(super) crash: Option<CrashCause>,
    /// Ticks since the last (re)start
    pub(super) tick_count: u64,
    pub(super) events: VecDeque<GameEvent>,
}

impl Simulation<Pcg32> {
    /// Start a run whose obstacle layout is reproducible from `seed`
    pub fn new(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        let tuning = config.validate()?;
        log::info!("Simulation seeded with {}", seed);
        Ok(Self::with_source(tuning, Pcg32::seed_from_u64(seed)))
    }
}

impl<G: GapSource> Simulation<G> {
    /// Start a run drawing gaps from `source`
    pub fn with_source(tuning: Tuning, mut source: G) -> Self {
        let avatar = Avatar::new(tuning.avatar_spawn(), tuning.avatar_size());
        let field = ObstacleField::new(&tuning, &mut source);
        Self {
            tuning,
            source,
            avatar,
            field,
            score: 0,
            phase: Phase::Running,
            crash: None,
            tick_count: 0,
            events: VecDeque::new(),
        }
    }

    /// Throw the current run away and start over. Valid in any phase.
    pub fn restart(&mut self) {
        log::info!(
            "Restarting (previous run: score {}, {} ticks)",
            self.score,
            self.tick_count
        );
        self.avatar = Avatar::new(self.tuning.avatar_spawn(), self.tuning.avatar_size());
        self.field = ObstacleField::new(&self.tuning, &mut self.source);
        self.score = 0;
        self.phase = Phase::Running;
        self.crash = None;
        self.tick_count = 0;
        self.record(GameEvent::Restarted);
    }

    /// Apply the jump impulse. Ignored once the run is over.
    pub fn jump(&mut self) {
        if self.phase == Phase::Running {
            self.avatar.jump(self.tuning.jump_impulse());
        }
    }

    /// Dispatch a discrete input
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Jump => self.jump(),
            Command::Restart => self.restart(),
        }
    }

    /// Take the events recorded since the last drain, oldest first
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub(super) fn record(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_count,
            score: self.score,
            phase: self.phase,
            crash: self.crash,
            avatar: AvatarView {
                x: self.avatar.pos.x,
                y: self.avatar.pos.y,
                velocity: self.avatar.velocity,
                size: self.avatar.size,
            },
            obstacles: self
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    gap_top: o.gap_top(),
                    top: o.top_rect(),
                    bottom: o.bottom_rect(),
                })
                .collect(),
            playfield_width: self.tuning.playfield_width(),
            playfield_height: self.tuning.playfield_height(),
            ground_height: self.tuning.ground_height(),
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn crash_cause(&self) -> Option<CrashCause> {
        self.crash
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ScriptedGaps;

    #[test]
    fn test_new_starts_running() {
        let sim = Simulation::new(&Config::default(), 12345).unwrap();
        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.crash_cause(), None);
        assert_eq!(sim.field().len(), 5);
        assert_eq!(sim.avatar().pos.x, 200);
        assert_eq!(sim.avatar().pos.y, 300);
        assert_eq!(sim.avatar().velocity, 0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = Config {
            gap_size: 600,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new(&config, 1),
            Err(ConfigError::EmptyGapRange { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Simulation::new(&Config::default(), 99999).unwrap();
        let b = Simulation::new(&Config::default(), 99999).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_snapshot_contents() {
        let sim = Simulation::with_source(Tuning::default(), ScriptedGaps::new([120]));
        let snap = sim.snapshot();
        assert_eq!(snap.tick, 0);
        assert_eq!(snap.phase, Phase::Running);
        assert!(!snap.is_over());
        assert_eq!(
            snap.avatar,
            AvatarView {
                x: 200,
                y: 300,
                velocity: 0,
                size: 30
            }
        );
        assert_eq!(snap.obstacles.len(), 5);
        assert_eq!(snap.obstacles[0].x, 800);
        assert_eq!(snap.obstacles[0].gap_top, 120);
        assert_eq!(snap.obstacles[0].top, Rect::new(800, 0, 100, 120));
        assert_eq!(snap.obstacles[0].bottom, Rect::new(800, 320, 100, 230));
        assert_eq!(snap.ground_y(), 550);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulation::new(&Config::default(), 5).unwrap();
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sim.snapshot());
    }

    #[test]
    fn test_jump_sets_impulse() {
        let mut sim = Simulation::new(&Config::default(), 1).unwrap();
        sim.jump();
        assert_eq!(sim.avatar().velocity, -10);
        sim.apply(Command::Jump);
        assert_eq!(sim.avatar().velocity, -10);
    }

    #[test]
    fn test_jump_ignored_when_over() {
        let mut sim = Simulation::new(&Config::default(), 1).unwrap();
        sim.phase = Phase::Over;
        sim.avatar.velocity = 4;
        sim.jump();
        assert_eq!(sim.avatar().velocity, 4);
    }

    #[test]
    fn test_restart_while_running_resets() {
        let mut sim = Simulation::new(&Config::default(), 1).unwrap();
        sim.jump();
        sim.score = 3;
        sim.tick_count = 50;
        sim.apply(Command::Restart);

        assert_eq!(sim.phase(), Phase::Running);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.avatar().velocity, 0);
        assert_eq!(sim.field().obstacles()[0].x, 800);
        assert_eq!(sim.drain_events().collect::<Vec<_>>(), vec![GameEvent::Restarted]);
        assert_eq!(sim.drain_events().count(), 0);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut sim = Simulation::new(&Config::default(), 1).unwrap();
        for score in 1..=300 {
            sim.record(GameEvent::Scored { score });
        }
        let events: Vec<_> = sim.drain_events().collect();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(events[0], GameEvent::Scored { score: 45 });
        assert_eq!(events.last(), Some(&GameEvent::Scored { score: 300 }));
    }

    #[test]
    fn test_repeated_restarts_stay_bounded() {
        let mut sim = Simulation::new(&Config::default(), 1).unwrap();
        for _ in 0..1000 {
            sim.restart();
        }
        assert_eq!(sim.drain_events().count(), MAX_PENDING_EVENTS);
    }
}
