//! Simulation configuration
//!
//! Plain values consumed by the population; no behaviour lives here apart
//! from validation and JSON helpers for the host.

use crate::models::agent::AgentParams;
use crate::models::naming::NamingPolicy;
use crate::models::position::Position;
use crate::population::engine::SimulationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial arrangement of seeded roots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeedLayout {
    /// Root `i` at `(i·spacing, 0, 0)`
    Line { spacing: f64 },
    /// Row-major grid in the horizontal plane
    Grid { spacing: f64, columns: usize },
}

impl Default for SeedLayout {
    fn default() -> Self {
        SeedLayout::Line { spacing: 3.0 }
    }
}

impl SeedLayout {
    /// Position of the `index`-th root
    pub fn position(&self, index: usize) -> Position {
        match *self {
            SeedLayout::Line { spacing } => Position::new(index as f64 * spacing, 0.0, 0.0),
            SeedLayout::Grid { spacing, columns } => {
                let columns = columns.max(1);
                let col = index % columns;
                let row = index / columns;
                Position::new(col as f64 * spacing, row as f64 * spacing, 0.0)
            }
        }
    }
}

/// Which new agents get a history record at their birth time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenesisPolicy {
    /// Only seeded roots; daughters start recording at their first commit
    #[default]
    RootsOnly,
    /// Roots and daughters; a daughter born in the last step still leaves
    /// one record
    AllAgents,
}

/// Complete simulation configuration
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Half-width of the neighbour lookup box
    pub search_radius: f64,
    /// Collision threshold
    pub min_separation: f64,
    /// Motion scale
    pub step_size: f64,
    /// Placement retries per step
    pub max_attempts: u32,
    /// Mean age at which division becomes possible
    pub mean_division_age: f64,
    /// Mean hard lifespan
    pub mean_death_age: f64,
    /// Density cap for division
    pub max_neighbors_for_division: usize,
    /// Keep motion and division in the horizontal plane
    pub planar_only: bool,
    pub naming_policy: NamingPolicy,
    /// Relative jitter of lifecycle timers, in [0, 1)
    pub lifespan_spread: f64,
    /// Seed of the population random stream
    pub rng_seed: u64,
    pub seed_layout: SeedLayout,
    pub genesis_policy: GenesisPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            search_radius: 5.0,
            min_separation: 3.0,
            step_size: 1.0,
            max_attempts: 5,
            mean_division_age: 10.0,
            mean_death_age: 50.0,
            max_neighbors_for_division: 6,
            planar_only: true,
            naming_policy: NamingPolicy::LineageEncoded,
            lifespan_spread: 0.6,
            rng_seed: 42,
            seed_layout: SeedLayout::default(),
            genesis_policy: GenesisPolicy::RootsOnly,
        }
    }
}

fn invalid(msg: impl Into<String>) -> SimulationError {
    SimulationError::InvalidConfig(msg.into())
}

impl SimulationConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.search_radius.is_finite() || self.search_radius <= 0.0 {
            return Err(invalid(format!(
                "search_radius must be a positive number, got {}",
                self.search_radius
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(invalid(format!(
                "min_separation must be >= 0, got {}",
                self.min_separation
            )));
        }
        if !self.step_size.is_finite() || self.step_size < 0.0 {
            return Err(invalid(format!(
                "step_size must be >= 0, got {}",
                self.step_size
            )));
        }
        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be > 0"));
        }
        if !self.mean_division_age.is_finite() || self.mean_division_age <= 0.0 {
            return Err(invalid("mean_division_age must be > 0"));
        }
        if !self.mean_death_age.is_finite() || self.mean_death_age <= 0.0 {
            return Err(invalid("mean_death_age must be > 0"));
        }
        if !(0.0..1.0).contains(&self.lifespan_spread) {
            return Err(invalid(format!(
                "lifespan_spread must be in [0, 1), got {}",
                self.lifespan_spread
            )));
        }
        match self.seed_layout {
            SeedLayout::Line { spacing } | SeedLayout::Grid { spacing, .. }
                if !spacing.is_finite() || spacing <= 0.0 =>
            {
                return Err(invalid("seed layout spacing must be > 0"));
            }
            SeedLayout::Grid { columns: 0, .. } => {
                return Err(invalid("seed grid needs at least one column"));
            }
            _ => {}
        }
        Ok(())
    }

    /// Per-agent behavioural parameters derived from this config
    pub fn agent_params(&self) -> AgentParams {
        AgentParams {
            search_radius: self.search_radius,
            min_separation: self.min_separation,
            step_size: self.step_size,
            max_attempts: self.max_attempts,
            max_neighbors_for_division: self.max_neighbors_for_division,
            planar_only: self.planar_only,
            mean_division_age: self.mean_division_age,
            mean_death_age: self.mean_death_age,
            lifespan_spread: self.lifespan_spread,
            naming_policy: self.naming_policy,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(json)
            .map_err(|e| SimulationError::Serialization(format!("Config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::Serialization(format!("Config serialization failed: {}", e)))
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
