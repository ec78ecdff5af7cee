//! Arrival records

use crate::core::time::SimTime;
use serde::{Deserialize, Serialize};

/// One customer's entry into the system
///
/// Produced by the arrival process, handed through the channel by value,
/// and consumed exactly once by the service process. Not `Clone`: a record
/// moves through the system and cannot be read twice.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalRecord {
    /// Zero-based arrival sequence number within the trial
    pub customer: u64,
    /// Virtual time at which the customer arrived
    pub arrived_at: SimTime,
}

impl ArrivalRecord {
    pub fn new(customer: u64, arrived_at: SimTime) -> Self {
        Self {
            customer,
            arrived_at,
        }
    }

    /// Time spent in the system if the customer leaves at `departed_at`
    pub fn sojourn(&self, departed_at: SimTime) -> SimTime {
        departed_at - self.arrived_at
    }
}
