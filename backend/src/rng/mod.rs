//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, reproducible sampling.
//! All randomness in the simulator goes through this module: the population
//! owns one stream, and every agent owns its own stream forked from it.

mod xorshift;

pub use xorshift::RngManager;
