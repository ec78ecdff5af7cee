//! Logical processes of a trial
//!
//! A process is an explicit state machine. The scheduler resumes it through
//! a single entry point, [`Process::resume`]; the process runs until it has
//! to wait, registers what it is waiting for, and returns its new state.
//! Only one process runs at a time within a trial, so the shared channel and
//! statistics are borrowed mutably through [`SimContext`] without locking.
//!
//! ```text
//!            ┌──────── resume ────────┐
//!  Running ──┤                        ├── Done
//!            ├── AwaitingTimer  ◄─────┤
//!            └── AwaitingChannel ◄────┘
//! ```

pub mod arrival;
pub mod service;

use crate::core::error::SimulationError;
use crate::core::time::SimTime;
use crate::events::{ProcessId, Scheduler};
use crate::models::{ArrivalRecord, Channel};
use crate::stats::TrialStatistics;
use serde::{Deserialize, Serialize};

pub use arrival::ArrivalProcess;
pub use service::ServiceProcess;

/// Where a process currently is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Registered and runnable; not yet suspended for the first time
    Running,
    /// Suspended until a timer event scheduled by the process fires
    AwaitingTimer,
    /// Suspended until a record is delivered through the channel
    AwaitingChannel,
    /// Finished; generates no further events
    Done,
}

/// A resumable logical process
pub trait Process: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Current state
    fn state(&self) -> ProcessState;

    /// Continue from the current suspension point until the next one
    ///
    /// # Errors
    /// Scheduler errors from the process's own wait requests, or
    /// [`SimulationError::ProcessInvariant`] when resumed from a state that
    /// has no continuation.
    fn resume(&mut self, ctx: &mut SimContext<'_>) -> Result<ProcessState, SimulationError>;
}

/// Everything a process may touch while it runs
pub struct SimContext<'a> {
    /// The process being resumed
    pub process: ProcessId,
    pub scheduler: &'a mut Scheduler,
    pub channel: &'a mut Channel<ArrivalRecord>,
    pub stats: &'a mut TrialStatistics,
}

impl SimContext<'_> {
    /// Current virtual time
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    /// Request a wake-up after `delay`; the caller then suspends
    pub fn advance_and_wait(&mut self, delay: SimTime) -> Result<ProcessState, SimulationError> {
        self.scheduler.schedule(self.process, delay)?;
        Ok(ProcessState::AwaitingTimer)
    }

    /// Put a record into the channel, waking the longest waiter if any
    ///
    /// The waiter is resumed at the current time, after every event already
    /// scheduled for this instant.
    pub fn put(&mut self, record: ArrivalRecord) -> Result<(), SimulationError> {
        if let Some(waiter) = self.channel.put(record) {
            self.scheduler.schedule(waiter, 0.0)?;
        }
        Ok(())
    }

    /// Take the oldest record, or register as a waiter and get `None`
    pub fn get(&mut self) -> Option<ArrivalRecord> {
        self.channel.get(self.process)
    }

    /// Collect the record delivered while this process was waiting
    pub fn take_delivered(&mut self) -> Option<ArrivalRecord> {
        self.channel.take_delivered(self.process)
    }
}

/// Error for a resume that the process's state machine cannot handle
pub(crate) fn cannot_resume(name: &str, state: ProcessState) -> SimulationError {
    SimulationError::ProcessInvariant(format!("{} process resumed while {:?}", name, state))
}
