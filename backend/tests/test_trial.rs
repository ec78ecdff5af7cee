//! Tests for single trials
//!
//! Every arrival is served, results are reproducible from the seed, and a
//! long stable run lands near the analytical mean time in system.

use queue_simulator_core_rs::orchestrator::{run_trial, Trial, TrialConfig};
use queue_simulator_core_rs::stats::{expected_time_in_system, TrialResult};
use queue_simulator_core_rs::SimulationError;

#[test]
fn test_every_arrival_completes() {
    for (customers, arrival, service) in [(1, 0.9, 1.0), (17, 0.5, 1.0), (5_000, 0.9, 1.0)] {
        let report = run_trial(&TrialConfig::new(customers, arrival, service).with_seed(11)).unwrap();

        assert_eq!(report.arrivals, customers);
        assert_eq!(report.completed, customers);
        assert_eq!(report.sojourn.count(), customers);
        assert!(report.sojourn.min().unwrap() >= 0.0);
        assert!(matches!(report.result, TrialResult::MeanTimeInSystem(m) if m > 0.0));
    }
}

#[test]
fn test_event_count_accounts_for_every_step() {
    // Two start-up events, one timer per arrival, one service timer per
    // customer, plus one wake-up per customer that found the server idle
    let customers = 2_000;
    let report = run_trial(&TrialConfig::new(customers, 0.7, 1.0).with_seed(5)).unwrap();

    let minimum = 2 + 2 * customers;
    assert!(report.events_dispatched >= minimum);
    assert!(report.events_dispatched <= minimum + customers);
}

#[test]
fn test_same_seed_same_result() {
    let config = TrialConfig::new(20_000, 0.9, 1.0).with_seed(424242);

    let first = run_trial(&config).unwrap();
    let second = run_trial(&config).unwrap();

    assert_eq!(first.result, second.result);
    assert_eq!(first, second, "whole report must be reproducible");
}

#[test]
fn test_different_seeds_different_results() {
    let a = run_trial(&TrialConfig::new(5_000, 0.9, 1.0).with_seed(1)).unwrap();
    let b = run_trial(&TrialConfig::new(5_000, 0.9, 1.0).with_seed(2)).unwrap();
    assert_ne!(a.result, b.result);
}

#[test]
fn test_heavier_load_builds_longer_queue() {
    let light = run_trial(&TrialConfig::new(20_000, 0.3, 1.0).with_seed(8)).unwrap();
    let heavy = run_trial(&TrialConfig::new(20_000, 0.95, 1.0).with_seed(8)).unwrap();

    assert!(heavy.peak_queue_length > light.peak_queue_length);
    assert!(heavy.result.value().unwrap() > light.result.value().unwrap());
}

#[test]
fn test_unstable_queue_still_terminates() {
    // λ > μ: the queue grows without bound but N is finite
    let report = run_trial(&TrialConfig::new(1_000, 2.0, 1.0).with_seed(3)).unwrap();
    assert_eq!(report.completed, 1_000);
    assert!(report.peak_queue_length > 100);
}

#[test]
fn test_invalid_parameters_fail_before_running() {
    assert!(matches!(
        Trial::new(TrialConfig::new(0, 0.9, 1.0)),
        Err(SimulationError::InvalidParameter { name: "customers", .. })
    ));
    assert!(matches!(
        Trial::new(TrialConfig::new(10, -0.9, 1.0)),
        Err(SimulationError::InvalidParameter { name: "arrival_rate", .. })
    ));
    assert!(matches!(
        Trial::new(TrialConfig::new(10, 0.9, 0.0)),
        Err(SimulationError::InvalidParameter { name: "service_rate", .. })
    ));
}

#[test]
fn test_long_single_trial_near_analytical_mean() {
    let config = TrialConfig::new(100_000, 0.9, 1.0).with_seed(20260101);
    let report = run_trial(&config).unwrap();
    let expected = expected_time_in_system(0.9, 1.0).unwrap();

    let mean = report.result.value().unwrap();
    // Per-trial standard deviation of the mean at ρ = 0.9 and N = 1e5 is about 0.6
    assert!(
        (mean - expected).abs() < 2.5,
        "mean time in system {} too far from {}",
        mean,
        expected
    );
    // Final virtual time is about N / λ
    assert!((report.final_time / (100_000.0 / 0.9) - 1.0).abs() < 0.05);
}

#[test]
fn test_light_load_sojourn_close_to_service_time() {
    // At ρ = 0.1 the time in system is 1/(μ-λ) ≈ 1.11
    let report = run_trial(&TrialConfig::new(50_000, 0.1, 1.0).with_seed(77)).unwrap();
    let mean = report.result.value().unwrap();
    assert!((mean - 1.0 / 0.9).abs() < 0.05, "mean {}", mean);
}
