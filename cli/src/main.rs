//! M/M/1 Monte Carlo CLI
//!
//! Runs the queue simulation and prints a single report line with the
//! estimated mean time in system, its 95% confidence interval and the
//! analytical expectation.
//!
//! # Example
//!
//! ```bash
//! # Reference benchmark: 100 trials of one million customers
//! mm1-sim
//!
//! # Single trial, fixed seed
//! mm1-sim --trials 1 --customers 100000 --seed 42
//!
//! # Settings from a file, trial count overridden, JSON output
//! mm1-sim --config experiment.json --trials 20 --json
//! ```

use clap::Parser;
use queue_simulator_core_rs::{run_experiment, ExperimentConfig, SimulationError};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// M/M/1 queue simulator
///
/// Every trial is reproducible from the seed; the estimate does not depend
/// on the number of worker threads.
#[derive(Parser, Debug)]
#[command(name = "mm1-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON experiment config; command-line flags override its values
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Customers per trial
    #[arg(short = 'n', long)]
    customers: Option<u64>,

    /// Arrival rate (lambda)
    #[arg(short = 'l', long)]
    arrival_rate: Option<f64>,

    /// Service rate (mu), must exceed the arrival rate
    #[arg(short = 'm', long)]
    service_rate: Option<f64>,

    /// Number of independent trials
    #[arg(short = 't', long)]
    trials: Option<usize>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to available parallelism)
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Print the full report as JSON instead of a single line
    #[arg(long)]
    json: bool,
}

fn load_config(path: &Path) -> Result<ExperimentConfig, SimulationError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SimulationError::ConfigIo(format!("{}: {}", path.display(), e)))?;
    ExperimentConfig::from_json(&text)
}

fn build_config(args: &Args) -> Result<ExperimentConfig, SimulationError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(customers) = args.customers {
        config.customers = customers;
    }
    if let Some(rate) = args.arrival_rate {
        config.arrival_rate = rate;
    }
    if let Some(rate) = args.service_rate {
        config.service_rate = rate;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if args.workers.is_some() {
        config.workers = args.workers;
    }
    // An explicit seed wins; a config file seed is kept; otherwise random
    match (args.seed, &args.config) {
        (Some(seed), _) => config.rng_seed = seed,
        (None, Some(_)) => {}
        (None, None) => config.rng_seed = rand::random(),
    }

    Ok(config)
}

fn run(args: &Args) -> Result<(), SimulationError> {
    let config = build_config(args)?;
    info!(seed = config.rng_seed, "Using seed");

    let report = run_experiment(&config)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| SimulationError::ConfigParse(format!("Report serialization failed: {}", e)))?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,queue_simulator_core_rs=info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
