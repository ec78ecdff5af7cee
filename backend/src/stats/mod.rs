//! Statistics: streaming data summaries, per-trial results and the
//! cross-trial aggregate with its confidence interval

pub mod aggregate;
pub mod summary;
pub mod trial;

pub use aggregate::{
    aggregate, expected_time_in_system, AggregateStatistics, MIN_SAMPLES_FOR_INTERVAL, Z_95,
};
pub use summary::DataSummary;
pub use trial::{TrialResult, TrialStatistics};
