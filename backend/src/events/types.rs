//! Scheduled event types

use crate::core::time::SimTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identity of a logical process within one trial
///
/// Processes are registered with a trial in order; the id is the
/// registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProcessId(pub usize);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process#{}", self.0)
    }
}

/// A pending resumption of one process at a target virtual time
///
/// Events are totally ordered by `(time, seq)`. `seq` is the scheduler's
/// insertion counter, so events at the same time dispatch in the order
/// they were scheduled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Virtual time at which the process resumes
    pub time: SimTime,
    /// Insertion sequence number (tie-break)
    pub seq: u64,
    /// Process to resume
    pub process: ProcessId,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}
