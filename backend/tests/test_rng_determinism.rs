//! Tests for deterministic RNG
//!
//! CRITICAL: Determinism is sacred. Same seed MUST produce same sequence.

use queue_simulator_core_rs::rng::derive_seed;
use queue_simulator_core_rs::RngManager;

#[test]
fn test_rng_new_with_seed() {
    let rng = RngManager::new(12345);
    assert_eq!(rng.get_state(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(12345);

    for _ in 0..100 {
        assert_eq!(rng1.next(), rng2.next(), "RNG not deterministic!");
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    let mut rng1 = RngManager::new(12345);
    let mut rng2 = RngManager::new(54321);

    assert_ne!(
        rng1.next(),
        rng2.next(),
        "Different seeds should produce different values"
    );
}

#[test]
fn test_exponential_deterministic() {
    let mut rng1 = RngManager::new(777);
    let mut rng2 = RngManager::new(777);

    for _ in 0..100 {
        assert_eq!(rng1.exponential(0.9), rng2.exponential(0.9));
    }
}

#[test]
fn test_exponential_sample_mean_matches_rate() {
    let mut rng = RngManager::new(2024);
    let n = 200_000;
    let rate = 0.9;

    let mean = (0..n).map(|_| rng.exponential(rate)).sum::<f64>() / n as f64;

    // Standard error of the mean is (1/rate)/sqrt(n) ≈ 0.0025
    assert!(
        (mean - 1.0 / rate).abs() < 0.02,
        "sample mean {} too far from {}",
        mean,
        1.0 / rate
    );
}

#[test]
fn test_exponential_memoryless_tail() {
    // P(X > 1/rate) = e^-1 ≈ 0.368
    let mut rng = RngManager::new(31337);
    let n = 100_000;
    let rate = 2.0;

    let above = (0..n).filter(|_| rng.exponential(rate) > 0.5).count();
    let fraction = above as f64 / n as f64;
    assert!((fraction - (-1.0f64).exp()).abs() < 0.01, "tail fraction {}", fraction);
}

#[test]
fn test_derived_seeds_are_stable_and_distinct() {
    let seeds: Vec<u64> = (0..100).map(|i| derive_seed(12345, "trial", i)).collect();

    let again: Vec<u64> = (0..100).map(|i| derive_seed(12345, "trial", i)).collect();
    assert_eq!(seeds, again);

    let mut unique = seeds.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), seeds.len(), "derived seeds collided");
}

#[test]
fn test_derived_streams_uncorrelated_start() {
    let mut a = RngManager::new(derive_seed(1, "arrival", 0));
    let mut b = RngManager::new(derive_seed(1, "service", 0));

    let same = (0..1000).filter(|_| a.next() == b.next()).count();
    assert_eq!(same, 0);
}
