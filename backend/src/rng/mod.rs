//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, deterministic sampling. Every trial owns its
//! own generators, seeded from the experiment seed through [`derive_seed`],
//! so parallel trials are uncorrelated and any single trial can be replayed.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod seed;
mod xorshift;

pub use seed::derive_seed;
pub use xorshift::RngManager;
