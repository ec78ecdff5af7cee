//! Streaming data summary
//!
//! Accumulates count, min, max and the first four central moments of a
//! stream of samples in a single pass, without storing the samples.
//!
//! # Algorithm
//!
//! Moments are updated with the one-pass formulas of Pébay (2008), "Formulas
//! for Robust, One-Pass Parallel Computation of Covariances and
//! Arbitrary-Order Statistical Moments", evaluated in the order given by
//! Meng (2015), "Simpler Online Updates for Arbitrary-Order Central Moments".
//! Two summaries can be merged exactly, so partial summaries built on
//! different workers combine into the summary of the union.
//!
//! `m1` is the running mean; `m2`, `m3`, `m4` are sums of powers of
//! deviations from it.

use serde::{Deserialize, Serialize};

/// One-pass summary of a sample: count, extremes and central moments
///
/// # Example
/// ```
/// use queue_simulator_core_rs::stats::DataSummary;
///
/// let summary: DataSummary = [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().collect();
/// assert_eq!(summary.count(), 5);
/// assert_eq!(summary.mean(), Some(3.0));
/// assert!((summary.variance().unwrap() - 2.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    count: u64,
    min: Option<f64>,
    max: Option<f64>,
    m1: f64,
    m2: f64,
    m3: f64,
    m4: f64,
}

impl DataSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample; returns the updated count
    pub fn add(&mut self, y: f64) -> u64 {
        self.min = Some(self.min.map_or(y, |m| m.min(y)));
        self.max = Some(self.max.map_or(y, |m| m.max(y)));

        let d = y - self.m1;
        let d_2 = d * d;
        let d_3 = d * d_2;
        self.count += 1;
        let n = self.count as f64;
        let d_n = d / n;
        let d_n_2 = d_n * d_n;
        let d_n_3 = d_n_2 * d_n;

        // Each line uses the already-updated lower moments
        self.m1 += d_n;
        self.m2 += d * (d - d_n);
        self.m3 += d * (d_2 - d_n_2) - 3.0 * d_n * self.m2;
        self.m4 += d * (d_3 - d_n_3) - 6.0 * d_n_2 * self.m2 - 4.0 * d_n * self.m3;

        self.count
    }

    /// Summary of the union of two samples
    pub fn merge(&self, other: &DataSummary) -> DataSummary {
        if other.count == 0 {
            return self.clone();
        }
        if self.count == 0 {
            return other.clone();
        }

        let n1 = self.count as f64;
        let n2 = other.count as f64;
        let count = self.count + other.count;
        let n = count as f64;

        let d21 = other.m1 - self.m1;
        let d21_n = d21 / n;
        let d21_n_2 = d21_n * d21_n;
        let d21_n_3 = d21_n * d21_n_2;

        let m1 = self.m1 + n2 * d21_n;
        let m2 = self.m2 + other.m2 + n1 * n2 * d21 * d21_n;
        let m3 = self.m3
            + other.m3
            + n1 * n2 * (n1 - n2) * d21 * d21_n_2
            + 3.0 * (n1 * other.m2 - n2 * self.m2) * d21_n;
        let m4 = self.m4
            + other.m4
            + n1 * n2 * (n1 * n1 - n1 * n2 + n2 * n2) * d21 * d21_n_3
            + 6.0 * (n1 * n1 * other.m2 + n2 * n2 * self.m2) * d21_n_2
            + 4.0 * (n1 * other.m3 - n2 * self.m3) * d21_n;

        DataSummary {
            count,
            min: min_of(self.min, other.min),
            max: max_of(self.max, other.max),
            m1,
            m2,
            m3,
            m4,
        }
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Sample mean; `None` when empty
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.m1)
    }

    /// Sample variance with Bessel's correction; `None` below two samples
    pub fn variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation; `None` below two samples
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Sample skewness, corrected for finite sample size; `None` below
    /// three samples. Zero for a sample with no spread.
    pub fn skewness(&self) -> Option<f64> {
        if self.count < 3 {
            return None;
        }
        if self.m2 == 0.0 {
            return Some(0.0);
        }
        let n = self.count as f64;
        let g = n.sqrt() * self.m3 / self.m2.powf(1.5);
        Some((n * (n - 1.0)).sqrt() * g / (n - 2.0))
    }

    /// Sample excess kurtosis, corrected for finite sample size; `None`
    /// below four samples. Zero for a sample with no spread.
    pub fn kurtosis(&self) -> Option<f64> {
        if self.count < 4 {
            return None;
        }
        if self.m2 == 0.0 {
            return Some(0.0);
        }
        let n = self.count as f64;
        let g = n * self.m4 / (self.m2 * self.m2) - 3.0;
        Some((n - 1.0) / ((n - 2.0) * (n - 3.0)) * ((n + 1.0) * g + 6.0))
    }
}

fn min_of(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn max_of(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

impl Extend<f64> for DataSummary {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for y in iter {
            self.add(y);
        }
    }
}

impl FromIterator<f64> for DataSummary {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut summary = DataSummary::new();
        summary.extend(iter);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_has_no_moments() {
        let summary = DataSummary::new();
        assert!(summary.is_empty());
        assert_eq!(summary.mean(), None);
        assert_eq!(summary.variance(), None);
        assert_eq!(summary.min(), None);
    }

    #[test]
    fn test_single_sample_has_mean_but_no_variance() {
        let summary: DataSummary = [4.0].into_iter().collect();
        assert_eq!(summary.mean(), Some(4.0));
        assert_eq!(summary.variance(), None);
        assert_eq!(summary.min(), Some(4.0));
        assert_eq!(summary.max(), Some(4.0));
    }

    #[test]
    fn test_constant_sample_has_zero_shape() {
        let summary: DataSummary = [2.0; 6].into_iter().collect();
        assert_eq!(summary.variance(), Some(0.0));
        assert_eq!(summary.skewness(), Some(0.0));
        assert_eq!(summary.kurtosis(), Some(0.0));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let summary: DataSummary = [1.0, 3.0, 8.0].into_iter().collect();
        assert_eq!(summary.merge(&DataSummary::new()), summary);
        assert_eq!(DataSummary::new().merge(&summary), summary);
    }

    #[test]
    fn test_reset() {
        let mut summary: DataSummary = [1.0, 2.0].into_iter().collect();
        summary.reset();
        assert!(summary.is_empty());
    }
}
