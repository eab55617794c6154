//! Fixed timestep accumulator
//!
//! Converts variable real frame times into a bounded number of fixed
//! simulation steps.

use std::time::Duration;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Time waiting to be simulated
    pub fn pending(&self) -> Duration {
        self.accumulator
    }

    /// Feed one real frame and return how many fixed steps to run.
    ///
    /// Time beyond `max_substeps` steps is dropped.
    pub fn advance(&mut self, frame_dt: Duration) -> u32 {
        if self.step.is_zero() {
            return 1;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        if self.accumulator >= self.step {
            log::debug!(
                "Dropping {:?} of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator = Duration::ZERO;
        }
        substeps
    }
}
