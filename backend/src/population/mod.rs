//! Population of live agents and the two-phase step
//!
//! - **config**: run parameters and seed layout
//! - **engine**: registry, id allocation, step loop, shutdown
//! - **checkpoint**: pause/resume support

pub mod checkpoint;
pub mod config;
pub mod engine;

pub use checkpoint::{compute_config_hash, validate_snapshot, PopulationSnapshot};
pub use config::{GenesisPolicy, SeedLayout, SimulationConfig};
pub use engine::{Population, SimulationError, StepResult};
