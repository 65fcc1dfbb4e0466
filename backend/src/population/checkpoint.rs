//! Checkpoint - Save/Load Population State
//!
//! Serializes the complete population (clock, id counter, random streams,
//! live agents with their histories) so a run can be paused and resumed.
//!
//! # Critical Invariants
//!
//! - **Determinism**: resuming produces the same trace as an uninterrupted run
//! - **Identity**: ids are unique and below the id counter
//! - **Config Matching**: state can only be restored with the config it was taken under

use crate::core::time::Time;
use crate::models::agent::{Agent, AgentId, ROOT_PARENT_ID};
use crate::models::trace::TraceRecord;
use crate::population::engine::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Complete population state snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    /// Format version
    pub version: u32,

    /// Simulation time at which the snapshot was taken
    pub time: Time,

    /// Next id the population will hand out
    pub next_id: AgentId,

    /// Number of roots seeded so far (root label numbering)
    pub roots_seeded: usize,

    /// Population random stream
    pub rng: RngManager,

    /// SHA256 hash of the config (for validation)
    pub config_hash: String,

    /// All live agents, ascending by id
    pub agents: Vec<Agent>,

    /// Histories of removed agents the sink has not accepted yet
    #[serde(default)]
    pub unflushed: Vec<Vec<TraceRecord>>,
}

impl PopulationSnapshot {
    pub const VERSION: u32 = 1;

    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self)
            .map_err(|e| SimulationError::Serialization(format!("Snapshot serialization failed: {}", e)))
    }

    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json)
            .map_err(|e| SimulationError::Serialization(format!("Snapshot parse failed: {}", e)))
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// Compute deterministic SHA256 hash of a config
///
/// Serializes through `serde_json::Value` with object keys sorted, so the
/// hash does not depend on field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    use serde_json::Value;
    use std::collections::BTreeMap;

    let value = serde_json::to_value(config)
        .map_err(|e| SimulationError::Serialization(format!("Config serialization failed: {}", e)))?;

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

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| SimulationError::Serialization(format!("Config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Validation
// ============================================================================

fn invalid(msg: String) -> SimulationError {
    SimulationError::StateValidation(msg)
}

/// Validate snapshot integrity
///
/// Checks:
/// - supported version
/// - ids unique, non-zero and below the id counter
/// - no agent ahead of the snapshot time
/// - every history strictly increasing in time
/// - no empty queued trace block
pub fn validate_snapshot(snapshot: &PopulationSnapshot) -> Result<(), SimulationError> {
    if snapshot.version != PopulationSnapshot::VERSION {
        return Err(invalid(format!(
            "Unsupported snapshot version {} (expected {})",
            snapshot.version,
            PopulationSnapshot::VERSION
        )));
    }

    let mut seen = HashSet::new();
    for agent in &snapshot.agents {
        let id = agent.id();
        if id == ROOT_PARENT_ID || id >= snapshot.next_id {
            return Err(invalid(format!(
                "Agent id {} outside allocated range [1, {})",
                id, snapshot.next_id
            )));
        }
        if !seen.insert(id) {
            return Err(SimulationError::DuplicateAgent(id));
        }
        // daughters born in the last step sit one unit ahead of the clock
        if agent.current_time() > snapshot.time + 1 {
            return Err(invalid(format!(
                "Agent {} at time {} is ahead of snapshot time {}",
                id,
                agent.current_time(),
                snapshot.time
            )));
        }
        let ordered = agent
            .history()
            .windows(2)
            .all(|pair| pair[0].time < pair[1].time);
        if !ordered {
            return Err(invalid(format!("Agent {} history is not strictly increasing", id)));
        }
    }

    if snapshot.unflushed.iter().any(|block| block.is_empty()) {
        return Err(invalid("Queued trace block is empty".to_string()));
    }

    Ok(())
}
