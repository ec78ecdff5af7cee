//! Arrival process
//!
//! Generates a fixed number of customers with exponentially distributed
//! inter-arrival times (a Poisson arrival stream) and puts each arrival
//! time into the channel. Exits for good after the last one.

use crate::core::error::SimulationError;
use crate::models::ArrivalRecord;
use crate::process::{cannot_resume, Process, ProcessState, SimContext};
use crate::rng::RngManager;

/// Poisson arrival generator for a fixed number of customers
#[derive(Debug, Clone)]
pub struct ArrivalProcess {
    /// Arrivals per unit of virtual time (λ)
    rate: f64,
    /// Total customers to generate
    limit: u64,
    /// Customers generated so far
    generated: u64,
    rng: RngManager,
    state: ProcessState,
}

impl ArrivalProcess {
    /// Create an arrival process for `limit` customers at rate `rate`
    ///
    /// `rate` must already be validated as positive and finite.
    pub fn new(limit: u64, rate: f64, rng: RngManager) -> Self {
        Self {
            rate,
            limit,
            generated: 0,
            rng,
            state: ProcessState::Running,
        }
    }

    /// Number of customers put into the channel so far
    pub fn generated(&self) -> u64 {
        self.generated
    }

    fn next_step(&mut self, ctx: &mut SimContext<'_>) -> Result<ProcessState, SimulationError> {
        if self.generated >= self.limit {
            return Ok(ProcessState::Done);
        }
        let interval = self.rng.exponential(self.rate);
        ctx.advance_and_wait(interval)
    }
}

impl Process for ArrivalProcess {
    fn name(&self) -> &'static str {
        "arrival"
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn resume(&mut self, ctx: &mut SimContext<'_>) -> Result<ProcessState, SimulationError> {
        match self.state {
            ProcessState::Running => {}
            ProcessState::AwaitingTimer => {
                let record = ArrivalRecord::new(self.generated, ctx.now());
                ctx.put(record)?;
                self.generated += 1;
            }
            state @ (ProcessState::AwaitingChannel | ProcessState::Done) => {
                return Err(cannot_resume(self.name(), state));
            }
        }

        self.state = self.next_step(ctx)?;
        Ok(self.state)
    }
}
