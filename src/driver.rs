//! Fixed-interval driver
//!
//! Turns wall-clock time into simulation ticks and serialises input with
//! them. Inputs can be sent from any thread through an [`InputHandle`]; they
//! are queued and applied, in arrival order, right before the next tick, so
//! a tick never sees half an input and no input is lost between ticks.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use rand_pcg::Pcg32;

use crate::config::Config;
use crate::consts::{MAX_FRAME, MAX_SUBSTEPS};
use crate::error::ConfigError;
use crate::sim::{GameEvent, GapSource, Simulation, Snapshot};

pub use crate::sim::Command;

/// Cloneable sender for player input
#[derive(Debug, Clone)]
pub struct InputHandle {
    sender: Sender<Command>,
}

impl InputHandle {
    /// Queue a command. Returns false if the driver is gone.
    pub fn send(&self, command: Command) -> bool {
        self.sender.send(command).is_ok()
    }

    pub fn jump(&self) -> bool {
        self.send(Command::Jump)
    }

    pub fn restart(&self) -> bool {
        self.send(Command::Restart)
    }
}

/// Owns a simulation and steps it at a fixed rate
#[derive(Debug)]
pub struct Driver<G = Pcg32> {
    sim: Simulation<G>,
    tick_period: Duration,
    accumulator: Duration,
    sender: Sender<Command>,
    receiver: Receiver<Command>,
}

impl Driver<Pcg32> {
    pub fn new(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_simulation(Simulation::new(config, seed)?))
    }
}

impl<G: GapSource> Driver<G> {
    pub fn from_simulation(sim: Simulation<G>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            tick_period: sim.tuning().tick_period(),
            sim,
            accumulator: Duration::ZERO,
            sender,
            receiver,
        }
    }

    /// A new handle feeding this driver's input queue
    pub fn input(&self) -> InputHandle {
        InputHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Apply every queued command without stepping. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.receiver.try_recv() {
            self.sim.apply(command);
            applied += 1;
        }
        applied
    }

    /// Run as many ticks as `elapsed` (plus leftover time) pays for.
    ///
    /// Queued commands are applied before each tick. Commands that arrive
    /// when no tick is due wait for the next call. Returns the events the
    /// ticks produced.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        self.accumulator += elapsed.min(MAX_FRAME);

        let mut substeps = 0;
        while self.accumulator >= self.tick_period && substeps < MAX_SUBSTEPS {
            self.pump();
            self.sim.step();
            self.accumulator -= self.tick_period;
            substeps += 1;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= self.tick_period {
            log::warn!(
                "Dropping {:?} of simulation backlog",
                self.accumulator - self.tick_period
            );
            self.accumulator = self.tick_period;
        }

        self.sim.drain_events().collect()
    }

    /// Consistent copy of the state as of the last completed tick
    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    pub fn simulation(&self) -> &Simulation<G> {
        &self.sim
    }
}
