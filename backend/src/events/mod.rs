//! Virtual-time event scheduling
//!
//! # Components
//!
//! - **types**: Process identities and scheduled wake-ups
//! - **scheduler**: The event queue and dispatch loop
//!
//! # Example
//!
//! ```rust
//! use queue_simulator_core_rs::events::{ProcessId, Scheduler};
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.schedule(ProcessId(0), 2.0).unwrap();
//! scheduler.schedule(ProcessId(1), 1.0).unwrap();
//!
//! let mut order = Vec::new();
//! scheduler
//!     .run(|_, event| {
//!         order.push((event.process, event.time));
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(order, vec![(ProcessId(1), 1.0), (ProcessId(0), 2.0)]);
//! ```

pub mod scheduler;
pub mod types;

// Re-exports for convenience
pub use scheduler::Scheduler;
pub use types::{ProcessId, ScheduledEvent};
