//! Domain models for the queueing simulation

pub mod channel;
pub mod record;

// Re-exports
pub use channel::Channel;
pub use record::ArrivalRecord;
