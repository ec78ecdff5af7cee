//! Cross-trial aggregation
//!
//! Reduces the scalar results of independent trials to a point estimate with
//! a normal-approximation 95% confidence interval:
//!
//! ```text
//! mean ± 1.96 · s / √n
//! ```
//!
//! where `s` is the sample standard deviation with Bessel's correction.
//! Degenerate trials are dropped before anything is computed, and fewer
//! than two valid trials is reported as an error instead of a zero-width
//! interval.

use crate::core::error::SimulationError;
use crate::stats::summary::DataSummary;
use crate::stats::trial::TrialResult;
use serde::{Deserialize, Serialize};

/// Standard normal quantile for a two-sided 95% interval
pub const Z_95: f64 = 1.96;

/// Fewest valid trials from which a standard deviation can be estimated
pub const MIN_SAMPLES_FOR_INTERVAL: usize = 2;

/// Point estimate and 95% confidence interval over valid trial results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    /// Number of valid trials used
    pub n: usize,
    /// Sample mean of the trial means
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    /// Standard error of the mean
    pub std_error: f64,
    /// Lower 95% confidence bound
    pub ci_lower: f64,
    /// Upper 95% confidence bound
    pub ci_upper: f64,
    /// Smallest trial mean
    pub min: f64,
    /// Largest trial mean
    pub max: f64,
}

impl AggregateStatistics {
    /// Half the width of the confidence interval
    pub fn half_width(&self) -> f64 {
        Z_95 * self.std_error
    }

    /// True if `value` lies inside the confidence interval (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        self.ci_lower <= value && value <= self.ci_upper
    }
}

/// Aggregate trial results, skipping degenerate ones
///
/// # Errors
/// [`SimulationError::InsufficientSamples`] when fewer than
/// [`MIN_SAMPLES_FOR_INTERVAL`] valid results remain.
///
/// # Example
/// ```
/// use queue_simulator_core_rs::stats::{aggregate, TrialResult};
///
/// let results = vec![
///     TrialResult::MeanTimeInSystem(9.0),
///     TrialResult::Degenerate,
///     TrialResult::MeanTimeInSystem(11.0),
/// ];
/// let stats = aggregate(&results).unwrap();
/// assert_eq!(stats.n, 2);
/// assert_eq!(stats.mean, 10.0);
/// assert!(stats.contains(10.0));
/// ```
pub fn aggregate(results: &[TrialResult]) -> Result<AggregateStatistics, SimulationError> {
    let summary: DataSummary = results.iter().filter_map(TrialResult::value).collect();
    let n = summary.count() as usize;

    let (Some(mean), Some(std_dev), Some(min), Some(max)) = (
        summary.mean(),
        summary.std_dev(),
        summary.min(),
        summary.max(),
    ) else {
        return Err(SimulationError::InsufficientSamples {
            valid: n,
            required: MIN_SAMPLES_FOR_INTERVAL,
        });
    };

    let std_error = std_dev / (n as f64).sqrt();
    let half_width = Z_95 * std_error;

    Ok(AggregateStatistics {
        n,
        mean,
        std_dev,
        std_error,
        ci_lower: mean - half_width,
        ci_upper: mean + half_width,
        min,
        max,
    })
}

/// Closed-form mean time in system of a stable M/M/1 queue: `1 / (μ - λ)`
///
/// # Errors
/// [`SimulationError::InvalidParameter`] unless `0 < arrival_rate < service_rate`.
///
/// # Example
/// ```
/// use queue_simulator_core_rs::stats::expected_time_in_system;
///
/// let expected = expected_time_in_system(0.9, 1.0).unwrap();
/// assert!((expected - 10.0).abs() < 1e-9);
/// assert!(expected_time_in_system(1.0, 1.0).is_err());
/// ```
pub fn expected_time_in_system(
    arrival_rate: f64,
    service_rate: f64,
) -> Result<f64, SimulationError> {
    if !(arrival_rate.is_finite() && arrival_rate > 0.0) {
        return Err(SimulationError::invalid(
            "arrival_rate",
            format!("must be positive and finite, got {}", arrival_rate),
        ));
    }
    if !(service_rate.is_finite() && service_rate > arrival_rate) {
        return Err(SimulationError::invalid(
            "service_rate",
            format!(
                "must exceed arrival rate {} for a stable queue, got {}",
                arrival_rate, service_rate
            ),
        ));
    }
    Ok(1.0 / (service_rate - arrival_rate))
}
