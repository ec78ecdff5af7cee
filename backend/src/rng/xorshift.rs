//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Debugging (replay a single trial exactly)
//! - Testing (verify queue behavior against fixed outcomes)
//! - Research (validate estimates)

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use queue_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let interval = rng.exponential(0.9); // mean 1/0.9
/// assert!(interval >= 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1, since xorshift never leaves the
    /// all-zero state.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for replay)
    ///
    /// # Example
    /// ```
    /// use queue_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// rng.next();
    /// let mut replay = RngManager::new(rng.get_state());
    /// assert_eq!(rng.next(), replay.next());
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits scaled by 2^-53
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Generate random f64 in range (0.0, 1.0]
    ///
    /// Never returns zero, so the result is always safe to take the
    /// logarithm of.
    pub fn next_open01(&mut self) -> f64 {
        1.0 - self.next_f64()
    }

    /// Sample an exponential variate with the given rate (mean `1 / rate`)
    ///
    /// Uses inversion: `-ln(U) / rate` with `U` uniform on (0, 1].
    ///
    /// # Panics
    /// Panics if `rate` is not strictly positive and finite. Rates are
    /// validated with the configuration before any sampling happens.
    ///
    /// # Example
    /// ```
    /// use queue_simulator_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let n = 10_000;
    /// let mean = (0..n).map(|_| rng.exponential(2.0)).sum::<f64>() / n as f64;
    /// assert!((mean - 0.5).abs() < 0.05);
    /// ```
    pub fn exponential(&mut self, rate: f64) -> f64 {
        assert!(
            rate.is_finite() && rate > 0.0,
            "exponential rate must be positive and finite"
        );
        -self.next_open01().ln() / rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_next_open01_never_zero() {
        let mut rng = RngManager::new(4242);

        for _ in 0..10_000 {
            let val = rng.next_open01();
            assert!(val > 0.0 && val <= 1.0, "next_open01() produced {}", val);
        }
    }

    #[test]
    #[should_panic(expected = "exponential rate must be positive and finite")]
    fn test_exponential_rejects_zero_rate() {
        let mut rng = RngManager::new(1);
        rng.exponential(0.0);
    }

    #[test]
    fn test_exponential_non_negative() {
        let mut rng = RngManager::new(99);

        for _ in 0..10_000 {
            let val = rng.exponential(0.9);
            assert!(val >= 0.0 && val.is_finite());
        }
    }
}
