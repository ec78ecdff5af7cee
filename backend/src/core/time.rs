//! Virtual time for the simulation
//!
//! Simulated time is a real number that starts at zero and only ever moves
//! forward. The clock is owned by the [`Scheduler`](crate::events::Scheduler);
//! processes read it but never set it, they can only ask to be woken up
//! after some delay.

use crate::core::error::SimulationError;
use serde::{Deserialize, Serialize};

/// Virtual elapsed time since the start of a trial
pub type SimTime = f64;

/// Monotonic virtual clock
///
/// # Example
/// ```
/// use queue_simulator_core_rs::SimClock;
///
/// let mut clock = SimClock::new(0.0);
/// assert_eq!(clock.now(), 0.0);
///
/// clock.advance_to(2.5).unwrap();
/// assert_eq!(clock.now(), 2.5);
///
/// // Time never moves backward
/// assert!(clock.advance_to(1.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Current virtual time
    now: SimTime,
    /// Time at which the clock was created
    start: SimTime,
}

impl SimClock {
    /// Create a clock starting at `start`
    ///
    /// # Panics
    /// Panics if `start` is negative or not finite
    pub fn new(start: SimTime) -> Self {
        assert!(
            start.is_finite() && start >= 0.0,
            "start time must be finite and non-negative"
        );
        Self { now: start, start }
    }

    /// Current virtual time
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Virtual time elapsed since the clock was created
    pub fn elapsed(&self) -> SimTime {
        self.now - self.start
    }

    /// Move the clock forward to `target`
    ///
    /// Advancing to the current time is allowed (zero-delay events).
    ///
    /// # Errors
    /// [`SimulationError::TimeReversal`] if `target` is earlier than the
    /// current time or is NaN. The clock is left unchanged.
    pub fn advance_to(&mut self, target: SimTime) -> Result<(), SimulationError> {
        // Negated comparison so that NaN is rejected as well
        if !(target >= self.now) {
            return Err(SimulationError::TimeReversal {
                now: self.now,
                target,
            });
        }
        self.now = target;
        Ok(())
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}
