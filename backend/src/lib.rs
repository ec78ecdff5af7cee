//! Queue Simulator Core - Rust Engine
//!
//! Discrete-event simulation of an M/M/1 queue with a parallel Monte Carlo
//! harness that turns many independent trials into a confidence interval
//! for the mean time in system.
//!
//! # Architecture
//!
//! - **core**: Virtual time and the error type
//! - **events**: Event scheduler (virtual clock + ordered wake-ups)
//! - **models**: Arrival records and the blocking FIFO channel
//! - **process**: Arrival and service processes as explicit state machines
//! - **stats**: Data summaries, trial results, cross-trial aggregation
//! - **orchestrator**: Trial runner and Monte Carlo experiment harness
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Virtual time never moves backward
//! 2. Records pass through the channel in FIFO order, each exactly once
//! 3. All randomness is deterministic (seeded RNG, one stream per process)
//! 4. Trials share no mutable state

// Module declarations
pub mod core;
pub mod events;
pub mod models;
pub mod orchestrator;
pub mod process;
pub mod rng;
pub mod stats;

// Re-exports for convenience
pub use crate::core::{SimClock, SimTime, SimulationError};
pub use events::{ProcessId, ScheduledEvent, Scheduler};
pub use models::{ArrivalRecord, Channel};
pub use orchestrator::{
    run_experiment, run_trial, Estimate, ExperimentConfig, ExperimentReport, Trial, TrialConfig,
    TrialReport,
};
pub use process::{ArrivalProcess, Process, ProcessState, ServiceProcess, SimContext};
pub use rng::RngManager;
pub use stats::{aggregate, AggregateStatistics, DataSummary, TrialResult, TrialStatistics};
