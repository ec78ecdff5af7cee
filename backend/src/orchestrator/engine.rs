//! Trial Engine
//!
//! Runs one M/M/1 trial to completion:
//!
//! ```text
//! 1. Validate the trial configuration
//! 2. Create scheduler, channel and statistics
//! 3. Spawn the arrival and service processes (both runnable at t = 0)
//! 4. Dispatch events in virtual-time order until none remain
//! 5. Reduce the statistics to the mean time in system
//! ```
//!
//! Everything a trial touches is owned by the trial, so trials can run on
//! any thread without sharing state.
//!
//! # Example
//!
//! ```rust
//! use queue_simulator_core_rs::orchestrator::{run_trial, TrialConfig};
//!
//! let config = TrialConfig::new(1_000, 0.5, 1.0).with_seed(12345);
//! let report = run_trial(&config).unwrap();
//!
//! assert_eq!(report.completed, 1_000);
//! assert!(report.result.value().unwrap() > 0.0);
//! ```

use crate::core::error::SimulationError;
use crate::core::time::SimTime;
use crate::events::{ProcessId, Scheduler};
use crate::models::{ArrivalRecord, Channel};
use crate::process::{ArrivalProcess, Process, ProcessState, ServiceProcess, SimContext};
use crate::rng::{derive_seed, RngManager};
use crate::stats::{DataSummary, TrialResult, TrialStatistics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 12345;

const ARRIVAL_STREAM: &str = "arrival";
const SERVICE_STREAM: &str = "service";

// ============================================================================
// Configuration Types
// ============================================================================

/// Parameters of a single trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Number of customers the arrival process generates (N)
    pub customers: u64,

    /// Arrival rate λ (customers per unit of virtual time)
    pub arrival_rate: f64,

    /// Service rate μ (completions per unit of busy time)
    pub service_rate: f64,

    /// Seed from which the arrival and service streams are derived
    pub rng_seed: u64,
}

impl TrialConfig {
    pub fn new(customers: u64, arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            customers,
            arrival_rate,
            service_rate,
            rng_seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Check parameters before any simulation work starts
    ///
    /// Stability (μ > λ) is not required here: an unstable queue with a
    /// finite number of customers still terminates. The experiment harness
    /// requires it, because it compares against the stable-queue formula.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.customers == 0 {
            return Err(SimulationError::invalid(
                "customers",
                "must be at least 1",
            ));
        }
        validate_rate("arrival_rate", self.arrival_rate)?;
        validate_rate("service_rate", self.service_rate)?;
        Ok(())
    }
}

pub(crate) fn validate_rate(name: &'static str, rate: f64) -> Result<(), SimulationError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(
            name,
            format!("must be positive and finite, got {}", rate),
        ))
    }
}

// ============================================================================
// Trial Report
// ============================================================================

/// Everything observed in one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialReport {
    /// Mean time in system, or degenerate
    pub result: TrialResult,

    /// Customers generated by the arrival process
    pub arrivals: u64,

    /// Customers that completed service
    pub completed: u64,

    /// Virtual time of the last dispatched event
    pub final_time: SimTime,

    /// Total events dispatched by the scheduler
    pub events_dispatched: u64,

    /// Longest queue observed in the channel (excluding the customer in service)
    pub peak_queue_length: usize,

    /// Distribution of individual sojourn times
    pub sojourn: DataSummary,
}

// ============================================================================
// Trial
// ============================================================================

/// One wired-up trial: scheduler, channel, statistics and processes
pub struct Trial {
    config: TrialConfig,
    scheduler: Scheduler,
    channel: Channel<ArrivalRecord>,
    stats: TrialStatistics,
    processes: Vec<Box<dyn Process>>,
}

impl Trial {
    /// Validate `config` and spawn the arrival and service processes
    ///
    /// Each process gets its own random stream derived from the trial seed.
    pub fn new(config: TrialConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let arrival = ArrivalProcess::new(
            config.customers,
            config.arrival_rate,
            RngManager::new(derive_seed(config.rng_seed, ARRIVAL_STREAM, 0)),
        );
        let service = ServiceProcess::new(
            config.service_rate,
            RngManager::new(derive_seed(config.rng_seed, SERVICE_STREAM, 0)),
        );

        let mut trial = Self {
            config,
            scheduler: Scheduler::new(),
            channel: Channel::new(),
            stats: TrialStatistics::new(),
            processes: Vec::with_capacity(2),
        };
        trial.spawn(Box::new(arrival))?;
        trial.spawn(Box::new(service))?;
        Ok(trial)
    }

    /// Register a process and make it runnable at the current time
    fn spawn(&mut self, process: Box<dyn Process>) -> Result<ProcessId, SimulationError> {
        let id = ProcessId(self.processes.len());
        self.processes.push(process);
        self.scheduler.schedule(id, 0.0)?;
        Ok(id)
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Run until no events remain and report the outcome
    ///
    /// # Errors
    /// Any scheduler or process invariant violation aborts the trial.
    pub fn run(self) -> Result<TrialReport, SimulationError> {
        let Trial {
            config,
            mut scheduler,
            mut channel,
            mut stats,
            mut processes,
        } = self;

        let events_dispatched = scheduler.run(|scheduler, event| {
            let process = processes.get_mut(event.process.0).ok_or_else(|| {
                SimulationError::ProcessInvariant(format!(
                    "event for unregistered {}",
                    event.process
                ))
            })?;
            let mut ctx = SimContext {
                process: event.process,
                scheduler,
                channel: &mut channel,
                stats: &mut stats,
            };
            process.resume(&mut ctx)?;
            Ok(())
        })?;

        // The service process is expected to be left waiting on the channel
        let suspended: Vec<&'static str> = processes
            .iter()
            .filter(|p| p.state() != ProcessState::Done)
            .map(|p| p.name())
            .collect();

        let report = TrialReport {
            result: stats.result(),
            arrivals: channel.total_put(),
            completed: stats.count(),
            final_time: scheduler.now(),
            events_dispatched,
            peak_queue_length: channel.peak_len(),
            sojourn: stats.sojourn_summary().clone(),
        };

        debug!(
            seed = config.rng_seed,
            arrivals = report.arrivals,
            completed = report.completed,
            final_time = report.final_time,
            events = report.events_dispatched,
            ?suspended,
            "Trial finished"
        );

        Ok(report)
    }
}

/// Build and run one trial
pub fn run_trial(config: &TrialConfig) -> Result<TrialReport, SimulationError> {
    Trial::new(config.clone())?.run()
}
