//! Tests for experiment configuration handling

use queue_simulator_core_rs::orchestrator::{
    experiment_fingerprint, ExperimentConfig, TrialConfig, DEFAULT_SEED,
};
use queue_simulator_core_rs::SimulationError;

#[test]
fn test_partial_json_uses_defaults() {
    let config = ExperimentConfig::from_json(r#"{ "customers": 1000, "trials": 4 }"#).unwrap();

    assert_eq!(config.customers, 1000);
    assert_eq!(config.trials, 4);
    assert_eq!(config.arrival_rate, 0.9);
    assert_eq!(config.service_rate, 1.0);
    assert_eq!(config.rng_seed, DEFAULT_SEED);
    assert_eq!(config.workers, None);
}

#[test]
fn test_unknown_field_rejected() {
    let err = ExperimentConfig::from_json(r#"{ "num_trials": 4 }"#).unwrap_err();
    assert!(matches!(err, SimulationError::ConfigParse(_)));
}

#[test]
fn test_json_round_trip_preserves_config() {
    let config = ExperimentConfig::new(250, 0.4, 0.8, 12)
        .with_seed(77)
        .with_workers(3);

    let restored = ExperimentConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_trial_config_inherits_parameters() {
    let config = ExperimentConfig::new(250, 0.4, 0.8, 12).with_seed(77);
    let trial: TrialConfig = config.trial_config(3);

    assert_eq!(trial.customers, 250);
    assert_eq!(trial.arrival_rate, 0.4);
    assert_eq!(trial.service_rate, 0.8);
    assert_ne!(trial.rng_seed, 77, "trial seeds are derived, not copied");
}

#[test]
fn test_fingerprint_tracks_result_relevant_fields() {
    let base = ExperimentConfig::new(250, 0.4, 0.8, 12).with_seed(77);
    let more_customers = ExperimentConfig {
        customers: 251,
        ..base.clone()
    };

    assert_eq!(
        experiment_fingerprint(&base).unwrap(),
        experiment_fingerprint(&base.clone().with_workers(8)).unwrap()
    );
    assert_ne!(
        experiment_fingerprint(&base).unwrap(),
        experiment_fingerprint(&more_customers).unwrap()
    );
}

#[test]
fn test_worker_count_defaults_to_available_parallelism() {
    let config = ExperimentConfig::default();
    assert!(config.worker_count() >= 1);
    assert_eq!(config.clone().with_workers(5).worker_count(), 5);
}
