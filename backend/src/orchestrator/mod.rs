//! Orchestrator - trial engine and Monte Carlo harness
//!
//! See `engine.rs` for a single trial and `experiment.rs` for the parallel
//! harness.

pub mod engine;
pub mod experiment;
pub mod fingerprint;

// Re-export main types for convenience
pub use engine::{run_trial, Trial, TrialConfig, TrialReport, DEFAULT_SEED};
pub use experiment::{
    run_experiment, Estimate, ExperimentConfig, ExperimentReport, DEFAULT_ARRIVAL_RATE,
    DEFAULT_CUSTOMERS, DEFAULT_SERVICE_RATE, DEFAULT_TRIALS,
};
pub use fingerprint::{compute_config_hash, experiment_fingerprint};
