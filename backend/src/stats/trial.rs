//! Per-trial statistics and the trial's scalar outcome

use crate::core::time::SimTime;
use crate::stats::summary::DataSummary;
use serde::{Deserialize, Serialize};

/// Sojourn-time accumulator for one trial
///
/// Mutated only by the trial's service process, once per completed
/// customer. `count` is therefore the number of customers that finished
/// service, not the number that arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialStatistics {
    sum_sojourn: f64,
    completed: u64,
    sojourn: DataSummary,
}

impl TrialStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed customer's time in system
    pub fn record(&mut self, sojourn: SimTime) {
        self.sum_sojourn += sojourn;
        self.completed += 1;
        self.sojourn.add(sojourn);
    }

    /// Sum of all recorded sojourn times
    pub fn sum(&self) -> f64 {
        self.sum_sojourn
    }

    /// Number of completed customers
    pub fn count(&self) -> u64 {
        self.completed
    }

    /// Mean time in system; `None` if nobody completed
    pub fn mean(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.sum_sojourn / self.completed as f64)
    }

    /// Distribution summary of individual sojourn times
    pub fn sojourn_summary(&self) -> &DataSummary {
        &self.sojourn
    }

    /// Reduce the trial to its scalar result
    pub fn result(&self) -> TrialResult {
        match self.mean() {
            Some(mean) => TrialResult::from_mean(mean),
            None => TrialResult::Degenerate,
        }
    }
}

/// Outcome of one trial: the mean time in system, or a degenerate marker
///
/// A trial is degenerate when no customer completed, or when its mean is
/// not a finite positive number. Degenerate results are excluded from
/// aggregation; they are never treated as a time in system of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrialResult {
    /// Mean sojourn time over all completed customers
    MeanTimeInSystem(f64),
    /// No usable statistic
    Degenerate,
}

impl TrialResult {
    /// Classify a mean: finite and strictly positive is valid
    ///
    /// # Example
    /// ```
    /// use queue_simulator_core_rs::stats::TrialResult;
    ///
    /// assert_eq!(TrialResult::from_mean(9.8), TrialResult::MeanTimeInSystem(9.8));
    /// assert_eq!(TrialResult::from_mean(0.0), TrialResult::Degenerate);
    /// assert_eq!(TrialResult::from_mean(f64::NAN), TrialResult::Degenerate);
    /// ```
    pub fn from_mean(mean: f64) -> Self {
        if mean.is_finite() && mean > 0.0 {
            TrialResult::MeanTimeInSystem(mean)
        } else {
            TrialResult::Degenerate
        }
    }

    /// The mean, if this result is valid
    pub fn value(&self) -> Option<f64> {
        match self {
            TrialResult::MeanTimeInSystem(mean) => Some(*mean),
            TrialResult::Degenerate => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, TrialResult::Degenerate)
    }
}
