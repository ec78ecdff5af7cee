//! Errors raised by the simulation core
//!
//! Invalid parameters and scheduler invariant violations are fatal and
//! propagate up through the trial and the experiment. Degenerate trials are
//! not errors at all (see [`crate::stats::TrialResult`]); an insufficient
//! number of valid trials is an error of the aggregation step only, which the
//! experiment harness folds into its report.

use thiserror::Error;

/// Errors that can occur while configuring or running a simulation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// A configuration value is outside its valid domain
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A process asked to wait for a negative, NaN or infinite delay
    #[error("Invalid delay {delay}: delays must be finite and non-negative")]
    InvalidDelay { delay: f64 },

    /// An event was scheduled (or dispatched) before the current virtual time
    #[error("Scheduler invariant violated: target time {target} is before current time {now}")]
    TimeReversal { now: f64, target: f64 },

    /// A process was resumed from a state it cannot be resumed from
    #[error("Process invariant violated: {0}")]
    ProcessInvariant(String),

    /// Too few valid trial results to compute a confidence interval
    #[error("Insufficient samples: {valid} valid trial results, at least {required} required")]
    InsufficientSamples { valid: usize, required: usize },

    /// The trial worker pool could not be created
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// A configuration file could not be read
    #[error("Config I/O error: {0}")]
    ConfigIo(String),

    /// A configuration file or value could not be (de)serialized
    #[error("Config serialization error: {0}")]
    ConfigParse(String),
}

impl SimulationError {
    /// Shorthand for [`SimulationError::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for errors that are invariant breaches of the engine itself
    /// rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidDelay { .. }
                | SimulationError::TimeReversal { .. }
                | SimulationError::ProcessInvariant(_)
        )
    }
}
