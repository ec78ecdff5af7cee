//! Configuration fingerprints
//!
//! A short, stable identifier for the configuration that produced a result,
//! so reports from separate runs can be matched up.
//!
//! # Critical Invariants
//!
//! - **Determinism**: Equal configs always hash equal, independent of field order
//! - **Relevance**: Only settings that change results are hashed (the worker
//!   count is excluded; it changes wall-clock time, never the estimate)

use crate::core::error::SimulationError;
use crate::orchestrator::experiment::ExperimentConfig;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute deterministic SHA256 hash of any serializable config
///
/// Uses canonical JSON serialization with recursively sorted keys.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let value = serde_json::to_value(config).map_err(|e| {
        SimulationError::ConfigParse(format!("Config serialization failed: {}", e))
    })?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(value)).map_err(|e| {
        SimulationError::ConfigParse(format!("Config serialization failed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Fingerprint of the result-relevant part of an experiment config
pub fn experiment_fingerprint(config: &ExperimentConfig) -> Result<String, SimulationError> {
    let relevant = ExperimentConfig {
        workers: None,
        ..config.clone()
    };
    compute_config_hash(&relevant)
}
