//! Monte Carlo Experiment Harness
//!
//! Runs many independent trials in parallel and reduces their results to a
//! point estimate with a 95% confidence interval.
//!
//! # Architecture
//!
//! ```text
//! ExperimentConfig ──validate──► trial configs (seed derived per index)
//!                                      │
//!                     rayon pool (one trial per task, no shared state)
//!                                      │
//!                        join: Vec<TrialReport> in index order
//!                                      │
//!                   drop degenerate ─► aggregate ─► ExperimentReport
//! ```
//!
//! Trial seeds depend only on the master seed and the trial index, so the
//! report is identical for any worker count.

use crate::core::error::SimulationError;
use crate::orchestrator::engine::{run_trial, validate_rate, TrialConfig, TrialReport, DEFAULT_SEED};
use crate::orchestrator::fingerprint::experiment_fingerprint;
use crate::rng::derive_seed;
use crate::stats::{aggregate, expected_time_in_system, AggregateStatistics, TrialResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Customers per trial in the reference benchmark
pub const DEFAULT_CUSTOMERS: u64 = 1_000_000;
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.9;
pub const DEFAULT_SERVICE_RATE: f64 = 1.0;
/// Trials in the parallel variant of the reference benchmark
pub const DEFAULT_TRIALS: usize = 100;

const TRIAL_STREAM: &str = "trial";

// ============================================================================
// Configuration
// ============================================================================

/// Complete experiment configuration
///
/// Missing fields take their defaults when deserialized, so a config file
/// only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Customers per trial (N)
    pub customers: u64,

    /// Arrival rate λ
    pub arrival_rate: f64,

    /// Service rate μ; must exceed λ
    pub service_rate: f64,

    /// Number of independent trials
    pub trials: usize,

    /// Master seed; trial seeds are derived from it
    pub rng_seed: u64,

    /// Worker threads (None = available parallelism)
    pub workers: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            customers: DEFAULT_CUSTOMERS,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            service_rate: DEFAULT_SERVICE_RATE,
            trials: DEFAULT_TRIALS,
            rng_seed: DEFAULT_SEED,
            workers: None,
        }
    }
}

impl ExperimentConfig {
    pub fn new(customers: u64, arrival_rate: f64, service_rate: f64, trials: usize) -> Self {
        Self {
            customers,
            arrival_rate,
            service_rate,
            trials,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::ConfigParse(format!("Invalid experiment config: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::ConfigParse(format!("Config serialization failed: {}", e)))
    }

    /// Check every parameter before any trial starts
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.customers == 0 {
            return Err(SimulationError::invalid("customers", "must be at least 1"));
        }
        if self.trials == 0 {
            return Err(SimulationError::invalid("trials", "must be at least 1"));
        }
        if self.workers == Some(0) {
            return Err(SimulationError::invalid("workers", "must be at least 1"));
        }
        validate_rate("arrival_rate", self.arrival_rate)?;
        validate_rate("service_rate", self.service_rate)?;
        expected_time_in_system(self.arrival_rate, self.service_rate)?;
        Ok(())
    }

    /// Analytical mean time in system, `1 / (μ - λ)`
    pub fn expected_time_in_system(&self) -> Result<f64, SimulationError> {
        expected_time_in_system(self.arrival_rate, self.service_rate)
    }

    /// Configuration of trial number `index`
    pub fn trial_config(&self, index: usize) -> TrialConfig {
        TrialConfig::new(self.customers, self.arrival_rate, self.service_rate)
            .with_seed(derive_seed(self.rng_seed, TRIAL_STREAM, index as u64))
    }

    /// Worker threads to use
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

// ============================================================================
// Report
// ============================================================================

/// Final estimate of an experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimate {
    /// At least two valid trials: mean with confidence interval
    Interval(AggregateStatistics),

    /// Fewer than two valid trials; no interval can be given.
    /// `mean` is the single valid trial's mean, if there is one.
    Insufficient { valid: usize, mean: Option<f64> },
}

impl Estimate {
    /// Point estimate, if any
    pub fn mean(&self) -> Option<f64> {
        match self {
            Estimate::Interval(stats) => Some(stats.mean),
            Estimate::Insufficient { mean, .. } => *mean,
        }
    }

    /// Confidence interval statistics, if they could be computed
    pub fn interval(&self) -> Option<&AggregateStatistics> {
        match self {
            Estimate::Interval(stats) => Some(stats),
            Estimate::Insufficient { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Estimate::Insufficient { .. })
    }
}

/// Outcome of a whole experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Configuration that produced this report
    pub config: ExperimentConfig,

    /// Fingerprint of the result-relevant configuration
    pub config_hash: String,

    /// Worker threads used
    pub workers: usize,

    /// Per-trial reports, in trial index order
    pub trials: Vec<TrialReport>,

    /// Number of degenerate trials excluded from the estimate
    pub degenerate: usize,

    /// Analytical expectation `1 / (μ - λ)`
    pub expected: f64,

    /// The estimate itself
    pub estimate: Estimate,
}

impl ExperimentReport {
    /// Scalar results of all trials, in trial index order
    pub fn results(&self) -> Vec<TrialResult> {
        self.trials.iter().map(|t| t.result).collect()
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.estimate {
            Estimate::Interval(stats) => write!(
                f,
                "Average time in system: {} (n {}, conf int {} - {}, expected: {})",
                stats.mean, stats.n, stats.ci_lower, stats.ci_upper, self.expected
            ),
            Estimate::Insufficient { valid, mean } => {
                match mean {
                    Some(mean) => write!(
                        f,
                        "Average time in system: {}, expected: {}",
                        mean, self.expected
                    )?,
                    None => write!(
                        f,
                        "Average time in system: unavailable, expected: {}",
                        self.expected
                    )?,
                }
                if self.config.trials > 1 {
                    write!(
                        f,
                        " (insufficient data: {} valid of {} trials, no confidence interval)",
                        valid, self.config.trials
                    )?;
                }
                Ok(())
            }
        }
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Run all trials of an experiment in parallel and aggregate them
///
/// # Errors
/// Invalid parameters fail before any trial starts. A scheduler or process
/// invariant violation in any trial fails the whole experiment. Too few
/// valid trials is *not* an error: it yields [`Estimate::Insufficient`].
///
/// # Example
///
/// ```rust
/// use queue_simulator_core_rs::orchestrator::{run_experiment, ExperimentConfig};
///
/// let config = ExperimentConfig::new(2_000, 0.5, 1.0, 4).with_seed(7).with_workers(2);
/// let report = run_experiment(&config).unwrap();
///
/// assert_eq!(report.trials.len(), 4);
/// assert!(report.estimate.interval().is_some());
/// ```
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport, SimulationError> {
    config.validate()?;
    let expected = config.expected_time_in_system()?;
    let config_hash = experiment_fingerprint(config)?;
    let workers = config.worker_count();

    info!(
        trials = config.trials,
        customers = config.customers,
        arrival_rate = config.arrival_rate,
        service_rate = config.service_rate,
        seed = config.rng_seed,
        workers,
        "Starting experiment"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("trial-worker-{}", i))
        .build()
        .map_err(|e| SimulationError::WorkerPool(e.to_string()))?;

    let started = Instant::now();
    let trials = pool.install(|| {
        (0..config.trials)
            .into_par_iter()
            .map(|index| {
                let report = run_trial(&config.trial_config(index))?;
                debug!(
                    trial = index,
                    result = ?report.result,
                    events = report.events_dispatched,
                    "Trial complete"
                );
                Ok(report)
            })
            .collect::<Result<Vec<_>, SimulationError>>()
    })?;

    let results: Vec<TrialResult> = trials.iter().map(|t| t.result).collect();
    let degenerate = results.iter().filter(|r| r.is_degenerate()).count();
    if degenerate > 0 {
        warn!(degenerate, "Discarding degenerate trials");
    }

    let estimate = match aggregate(&results) {
        Ok(stats) => Estimate::Interval(stats),
        Err(SimulationError::InsufficientSamples { valid, required }) => {
            warn!(valid, required, "Too few valid trials for a confidence interval");
            Estimate::Insufficient {
                valid,
                mean: results.iter().find_map(TrialResult::value),
            }
        }
        Err(e) => return Err(e),
    };

    info!(
        mean = ?estimate.mean(),
        expected,
        degenerate,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Experiment finished"
    );

    Ok(ExperimentReport {
        config: config.clone(),
        config_hash,
        workers,
        trials,
        degenerate,
        expected,
        estimate,
    })
}
