//! Event scheduler
//!
//! Holds the virtual clock and a min-heap of pending wake-ups keyed by
//! `(time, seq)`. [`Scheduler::run`] pops the earliest event, moves the
//! clock to its time and hands it to a dispatch callback, until the heap
//! is empty.
//!
//! A process "waits" by scheduling itself; there is no other way to make
//! virtual time pass. A process that is blocked on something other than a
//! timer (an empty channel) has no event in the heap, so once nothing else
//! can wake it the heap drains and the run ends with that process simply
//! left suspended.

use crate::core::error::SimulationError;
use crate::core::time::{SimClock, SimTime};
use crate::events::types::{ProcessId, ScheduledEvent};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::trace;

/// Virtual clock plus ordered set of pending process wake-ups
#[derive(Debug, Default)]
pub struct Scheduler {
    clock: SimClock,
    queue: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
    dispatched: u64,
}

impl Scheduler {
    /// Create a scheduler with the clock at zero and no pending events
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `process` to resume after `delay` units of virtual time
    ///
    /// This is the registration half of "advance and wait": the caller is
    /// expected to suspend right after.
    ///
    /// # Errors
    /// [`SimulationError::InvalidDelay`] if `delay` is negative, NaN or
    /// infinite. Negative delays are never clamped to zero.
    pub fn schedule(
        &mut self,
        process: ProcessId,
        delay: SimTime,
    ) -> Result<ScheduledEvent, SimulationError> {
        if !(delay >= 0.0) || !delay.is_finite() {
            return Err(SimulationError::InvalidDelay { delay });
        }
        self.schedule_at(process, self.now() + delay)
    }

    /// Schedule `process` to resume at absolute virtual time `time`
    ///
    /// # Errors
    /// [`SimulationError::TimeReversal`] if `time` is earlier than the
    /// current time (or NaN), [`SimulationError::InvalidDelay`] if it is
    /// infinite.
    pub fn schedule_at(
        &mut self,
        process: ProcessId,
        time: SimTime,
    ) -> Result<ScheduledEvent, SimulationError> {
        if !(time >= self.now()) {
            return Err(SimulationError::TimeReversal {
                now: self.now(),
                target: time,
            });
        }
        if time.is_infinite() {
            return Err(SimulationError::InvalidDelay { delay: time });
        }

        let event = ScheduledEvent {
            time,
            seq: self.next_seq,
            process,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(event));
        Ok(event)
    }

    /// Number of events waiting to be dispatched
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when no events remain
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total number of events dispatched so far
    pub fn events_dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Time of the earliest pending event, if any
    pub fn peek_time(&self) -> Option<SimTime> {
        self.queue.peek().map(|Reverse(event)| event.time)
    }

    /// Remove the earliest event and advance the clock to its time
    ///
    /// # Errors
    /// [`SimulationError::TimeReversal`] if the event lies in the past,
    /// which can only happen if the heap ordering has been broken.
    pub fn next_event(&mut self) -> Result<Option<ScheduledEvent>, SimulationError> {
        let Some(Reverse(event)) = self.queue.pop() else {
            return Ok(None);
        };
        self.clock.advance_to(event.time)?;
        self.dispatched += 1;
        trace!(time = event.time, seq = event.seq, process = %event.process, "dispatch");
        Ok(Some(event))
    }

    /// Dispatch events in `(time, seq)` order until none remain
    ///
    /// `dispatch` receives the scheduler (so the resumed process can
    /// schedule its next wake-up) and the event being dispatched. The first
    /// error returned by `dispatch` aborts the run.
    ///
    /// Returns the total number of events dispatched by this scheduler.
    pub fn run<F>(&mut self, mut dispatch: F) -> Result<u64, SimulationError>
    where
        F: FnMut(&mut Scheduler, ScheduledEvent) -> Result<(), SimulationError>,
    {
        while let Some(event) = self.next_event()? {
            dispatch(self, event)?;
        }
        Ok(self.dispatched)
    }
}
