//! Cell Lineage Simulator Core - Rust Engine
//!
//! Discrete-time agent-based simulation of a cell population. Cells move
//! under a minimum-separation constraint, divide when old enough and not
//! crowded, die when their lifespan runs out, and leave one trace block
//! per cell describing their trajectory and lineage.
//!
//! # Architecture
//!
//! - **core**: Simulation clock
//! - **models**: Domain types (Agent, Position, TraceRecord, Event)
//! - **placement**: Collision-avoiding placement search
//! - **spatial**: Frozen per-step position snapshot and neighbour queries
//! - **population**: Agent registry and the two-phase step
//! - **io**: Trace sinks and trace reading
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, one stream per agent)
//! 2. Agents only ever see pre-step positions of other agents
//! 3. Ids are unique, start at 1 and are never reused
//! 4. Every agent's history is written exactly once, in time order

// Module declarations
pub mod core;
pub mod io;
pub mod models;
pub mod placement;
pub mod population;
pub mod rng;
pub mod spatial;

// Re-exports for convenience
pub use core::time::{SimulationClock, Time};
pub use io::{read_trace, MemorySink, TraceParseError, TraceReader, TraceSink, TraceWriter};
pub use models::{
    agent::{Agent, AgentId, AgentParams, ChildSpec, LifecycleTimers, Outcome, ROOT_PARENT_ID},
    event::{Event, EventLog},
    naming::{NamingPolicy, StatusHint},
    position::Position,
    trace::TraceRecord,
};
pub use placement::{DisplacementSampler, FixedDisplacement, GaussianDisplacement, Placement};
pub use population::{
    GenesisPolicy, Population, PopulationSnapshot, SeedLayout, SimulationConfig, SimulationError,
    StepResult,
};
pub use rng::RngManager;
pub use spatial::PositionSnapshot;
