//! Run lifecycle
//!
//! Sits between the input/tick source and the simulation: coalesces jump
//! requests into one per tick, notices game over, and starts a fresh world
//! on the next input. Best score is kept for the process only.

use crate::sim::{Snapshot, StepOutcome, TickInput, World, step};
use crate::{Tuning, TuningError};

/// A sequence of runs sharing one tuning
#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    /// One-shot input collected since the last tick
    pending: TickInput,
    best_score: u32,
    runs_finished: u32,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        let world = World::new(tuning, seed)?;
        log::info!("Session started with seed: {}", seed);
        Ok(Self {
            world,
            pending: TickInput::default(),
            best_score: 0,
            runs_finished: 0,
        })
    }

    /// Record a jump for the next tick. After game over this restarts instead.
    pub fn request_jump(&mut self) {
        if self.world.is_over() {
            self.restart();
            return;
        }
        self.pending.jump = true;
    }

    /// Advance one tick, consuming the pending input
    pub fn tick(&mut self) -> StepOutcome {
        let was_over = self.world.is_over();
        let input = std::mem::take(&mut self.pending);
        let outcome = step(&mut self.world, &input);

        if outcome.terminal && !was_over {
            self.runs_finished += 1;
            if outcome.score > self.best_score {
                self.best_score = outcome.score;
                log::info!("New best score: {}", self.best_score);
            }
        }
        outcome
    }

    /// Fresh world with the next seed; nothing from the old run is kept
    pub fn restart(&mut self) {
        let seed = self.world.seed.wrapping_add(1);
        self.world.reset(seed);
        self.pending = TickInput::default();
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }
}
