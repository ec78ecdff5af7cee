//! Service process
//!
//! Single server loop: take the oldest waiting customer, hold for an
//! exponentially distributed service time, record the customer's sojourn
//! time, repeat. It never terminates on its own. When arrivals stop and the
//! channel runs dry its last `get` leaves it waiting with no event pending,
//! the scheduler drains and the trial ends with this process still
//! suspended.

use crate::core::error::SimulationError;
use crate::models::ArrivalRecord;
use crate::process::{cannot_resume, Process, ProcessState, SimContext};
use crate::rng::RngManager;

/// FIFO single-server loop with exponential service times
#[derive(Debug)]
pub struct ServiceProcess {
    /// Service completions per unit of busy time (μ)
    rate: f64,
    rng: RngManager,
    /// Customer currently being served
    in_service: Option<ArrivalRecord>,
    state: ProcessState,
}

impl ServiceProcess {
    /// Create a service process with rate `rate`
    ///
    /// `rate` must already be validated as positive and finite.
    pub fn new(rate: f64, rng: RngManager) -> Self {
        Self {
            rate,
            rng,
            in_service: None,
            state: ProcessState::Running,
        }
    }

    /// Customer currently at the server, if any
    pub fn in_service(&self) -> Option<&ArrivalRecord> {
        self.in_service.as_ref()
    }

    fn begin_service(
        &mut self,
        ctx: &mut SimContext<'_>,
        record: ArrivalRecord,
    ) -> Result<ProcessState, SimulationError> {
        let duration = self.rng.exponential(self.rate);
        self.in_service = Some(record);
        ctx.advance_and_wait(duration)
    }

    fn fetch_next(&mut self, ctx: &mut SimContext<'_>) -> Result<ProcessState, SimulationError> {
        match ctx.get() {
            Some(record) => self.begin_service(ctx, record),
            None => Ok(ProcessState::AwaitingChannel),
        }
    }
}

impl Process for ServiceProcess {
    fn name(&self) -> &'static str {
        "service"
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn resume(&mut self, ctx: &mut SimContext<'_>) -> Result<ProcessState, SimulationError> {
        self.state = match self.state {
            ProcessState::Running => self.fetch_next(ctx)?,
            ProcessState::AwaitingTimer => {
                let record = self
                    .in_service
                    .take()
                    .ok_or_else(|| cannot_resume(self.name(), ProcessState::AwaitingTimer))?;
                ctx.stats.record(record.sojourn(ctx.now()));
                self.fetch_next(ctx)?
            }
            ProcessState::AwaitingChannel => {
                let record = ctx.take_delivered().ok_or_else(|| {
                    SimulationError::ProcessInvariant(
                        "service process woken without a delivered record".to_string(),
                    )
                })?;
                self.begin_service(ctx, record)?
            }
            ProcessState::Done => return Err(cannot_resume(self.name(), ProcessState::Done)),
        };
        Ok(self.state)
    }
}
