//! Population Engine
//!
//! Owns the live agents and drives the per-step update:
//!
//! ```text
//! For each step:
//! 1. Clear staging buffers
//! 2. Advance the clock by 1
//! 3. Freeze a snapshot of all authoritative positions
//! 4. Computation phase: every live agent computes its tentative state
//!    against the snapshot (optionally in parallel)
//! 5. Commit phase (serialized):
//!    a. stage divisions and deaths, allocate daughter ids
//!    b. commit every agent (apply position, append snapshot)
//!    c. remove staged agents, queue their histories
//!    d. admit the daughters
//!    e. write queued histories to the sink
//! ```
//!
//! The live map is never mutated during the computation phase; commit is
//! the only place agents are inserted or removed. The map is settled
//! before anything is written, so a failing sink leaves the step fully
//! committed; blocks it did not accept stay queued for the next write.
//!
//! # Example
//!
//! ```rust
//! use cell_lineage_sim_core::{MemorySink, Population, SimulationConfig};
//!
//! let mut population = Population::new(SimulationConfig::default(), MemorySink::new()).unwrap();
//! population.seed(2).unwrap();
//!
//! for _ in 0..20 {
//!     population.step().unwrap();
//! }
//!
//! let sink = population.shutdown().unwrap();
//! assert!(!sink.blocks().is_empty());
//! ```

use crate::core::time::{SimulationClock, Time};
use crate::io::TraceSink;
use crate::models::agent::{Agent, AgentId, AgentParams, LifecycleTimers, Outcome};
use crate::models::event::{Event, EventLog};
use crate::models::naming::StatusHint;
use crate::models::position::Position;
use crate::models::trace::TraceRecord;
use crate::placement::{DisplacementSampler, GaussianDisplacement};
use crate::population::checkpoint::{compute_config_hash, validate_snapshot, PopulationSnapshot};
use crate::population::config::{GenesisPolicy, SimulationConfig};
use crate::rng::RngManager;
use crate::spatial::PositionSnapshot;
use log::{debug, info};
use std::collections::{BTreeMap, VecDeque};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// ============================================================================
// Errors and Results
// ============================================================================

/// Simulation error types
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// An id was registered twice
    #[error("Invariant violation: agent {0} is already registered")]
    DuplicateAgent(AgentId),

    /// An id was removed or looked up that is not live
    #[error("Invariant violation: agent {0} is not registered")]
    AgentNotFound(AgentId),

    /// Trace sink or file failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Checkpoint was taken under a different config
    #[error("Config mismatch: checkpoint hash {expected}, config hash {actual}")]
    ConfigMismatch { expected: String, actual: String },

    #[error("State validation error: {0}")]
    StateValidation(String),
}

/// Result of a single step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepResult {
    /// Time reached by this step
    pub time: Time,

    /// Live agents before the step
    pub live_before: usize,

    /// Live agents after the commit
    pub live_after: usize,

    pub divisions: usize,
    pub deaths: usize,

    /// Daughters admitted (always 2 × divisions)
    pub births: usize,

    /// Agents that found no collision-free position
    pub blocked: usize,
}

/// Tentative result of one agent in the computation phase
#[derive(Debug)]
pub(crate) struct Computed {
    pub id: AgentId,
    pub neighbors: usize,
    pub outcome: Outcome,
}

// ============================================================================
// Population
// ============================================================================

/// Live agents plus everything needed to advance them
///
/// # Determinism
///
/// The population stream (`rng_seed`) seeds one stream per root; daughters
/// fork from their mother's stream. Same seed + same config = identical
/// trace, with or without the `parallel` feature.
pub struct Population<S: TraceSink> {
    config: SimulationConfig,
    params: AgentParams,

    clock: SimulationClock,
    rng: RngManager,
    sampler: Box<dyn DisplacementSampler>,

    /// Live agents, keyed (and iterated) by id
    live_agents: BTreeMap<AgentId, Agent>,

    /// Next id to hand out; ids start at 1 (0 marks "no parent")
    next_id_counter: AgentId,

    /// Roots seeded so far (numbering of root labels)
    roots_seeded: usize,

    /// Daughters staged in the current step
    pending_births: Vec<Agent>,

    /// Ids staged for removal in the current step
    pending_deaths: Vec<AgentId>,

    /// Histories of removed agents not yet accepted by the sink
    unflushed: VecDeque<Vec<TraceRecord>>,

    event_log: EventLog,
    sink: S,
}

impl<S: TraceSink> Population<S> {
    /// Create a population with Gaussian displacement and the config's seed
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the configuration does not validate.
    pub fn new(config: SimulationConfig, sink: S) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_components(config, rng, Box::new(GaussianDisplacement), sink)
    }

    /// Create a population with an injected displacement sampler
    pub fn with_sampler(
        config: SimulationConfig,
        sampler: Box<dyn DisplacementSampler>,
        sink: S,
    ) -> Result<Self, SimulationError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_components(config, rng, sampler, sink)
    }

    /// Create a population with an explicit random stream and sampler
    pub fn with_components(
        config: SimulationConfig,
        rng: RngManager,
        sampler: Box<dyn DisplacementSampler>,
        sink: S,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let params = config.agent_params();

        Ok(Self {
            config,
            params,
            clock: SimulationClock::new(),
            rng,
            sampler,
            live_agents: BTreeMap::new(),
            next_id_counter: 1,
            roots_seeded: 0,
            pending_births: Vec::new(),
            pending_deaths: Vec::new(),
            unflushed: VecDeque::new(),
            event_log: EventLog::new(),
            sink,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn now(&self) -> Time {
        self.clock.now()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn live_count(&self) -> usize {
        self.live_agents.len()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.live_agents.contains_key(&id)
    }

    pub fn get_agent(&self, id: AgentId) -> Option<&Agent> {
        self.live_agents.get(&id)
    }

    /// Live agents in ascending id order
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.live_agents.values()
    }

    pub fn live_ids(&self) -> Vec<AgentId> {
        self.live_agents.keys().copied().collect()
    }

    /// The id the next allocation will return
    pub fn next_id(&self) -> AgentId {
        self.next_id_counter
    }

    /// Lifecycle events recorded since the last drain
    ///
    /// The log keeps growing for the whole run unless the host calls
    /// [`Population::drain_events`].
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Take every recorded event, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.event_log.drain()
    }

    /// Blocks waiting for the sink after a failed write
    pub fn unflushed_blocks(&self) -> usize {
        self.unflushed.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ========================================================================
    // Identity and registration
    // ========================================================================

    /// Hand out a fresh id; ids are never reused
    pub fn allocate_id(&mut self) -> AgentId {
        let id = self.next_id_counter;
        self.next_id_counter += 1;
        id
    }

    fn register(&mut self, agent: Agent) -> Result<(), SimulationError> {
        let id = agent.id();
        if self.live_agents.contains_key(&id) {
            return Err(SimulationError::DuplicateAgent(id));
        }
        self.live_agents.insert(id, agent);
        Ok(())
    }

    fn deregister(&mut self, id: AgentId) -> Result<Agent, SimulationError> {
        self.live_agents
            .remove(&id)
            .ok_or(SimulationError::AgentNotFound(id))
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Seed `n` lineage roots using the configured layout
    ///
    /// Roots are admitted immediately; no staging is needed before the
    /// first step.
    pub fn seed(&mut self, n: usize) -> Result<Vec<AgentId>, SimulationError> {
        let layout = self.config.seed_layout;
        (0..n)
            .map(|_| {
                let position = layout.position(self.roots_seeded);
                self.admit_root(None, position, None)
            })
            .collect()
    }

    /// Seed one root per given position
    pub fn seed_at(&mut self, positions: &[Position]) -> Result<Vec<AgentId>, SimulationError> {
        positions
            .iter()
            .map(|position| self.admit_root(None, *position, None))
            .collect()
    }

    /// Seed a single root with an explicit label and lifecycle timers
    pub fn seed_agent(
        &mut self,
        label: impl Into<String>,
        position: Position,
        timers: LifecycleTimers,
    ) -> Result<AgentId, SimulationError> {
        self.admit_root(Some(label.into()), position, Some(timers))
    }

    fn admit_root(
        &mut self,
        label: Option<String>,
        position: Position,
        timers: Option<LifecycleTimers>,
    ) -> Result<AgentId, SimulationError> {
        if !self.clock.is_at_genesis() {
            return Err(SimulationError::InvalidConfig(format!(
                "roots can only be seeded at time 0 (now {})",
                self.clock.now()
            )));
        }
        if let Some(label) = label.as_deref() {
            validate_label(label)?;
        }
        if !position.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "seed position {} is not finite",
                position
            )));
        }

        let index = self.roots_seeded;
        self.roots_seeded += 1;

        let id = self.allocate_id();
        let label = label.unwrap_or_else(|| self.params.naming_policy.root_label(index));
        let mut agent_rng = self.rng.fork();
        let timers = match timers {
            Some(timers) => timers,
            None => LifecycleTimers::sample(self.clock.now(), &self.params, &mut agent_rng),
        };

        let mut agent = Agent::root(
            id,
            label.clone(),
            position,
            self.clock.now(),
            timers,
            self.params,
            agent_rng,
        );
        agent.record_genesis();

        debug!(
            "seeded agent {} ({}) at {}, divides after {}, dies after {}",
            id, label, position, timers.division_eligible_time, timers.death_time
        );
        self.register(agent)?;
        self.event_log.log(Event::AgentSeeded {
            time: self.clock.now(),
            agent_id: id,
            label,
            position,
        });
        Ok(id)
    }

    // ========================================================================
    // Neighbour query
    // ========================================================================

    fn position_snapshot(&self) -> PositionSnapshot {
        self.live_agents
            .values()
            .map(|a| (a.id(), a.position()))
            .collect()
    }

    /// Authoritative positions of the other live agents inside `id`'s
    /// search box
    pub fn neighbor_query(&self, id: AgentId) -> Result<Vec<Position>, SimulationError> {
        let agent = self
            .live_agents
            .get(&id)
            .ok_or(SimulationError::AgentNotFound(id))?;
        Ok(self
            .position_snapshot()
            .neighbors_in_box(id, &agent.position(), agent.params().search_radius))
    }

    // ========================================================================
    // Step
    // ========================================================================

    /// Advance the whole population by one time unit
    ///
    /// # Errors
    ///
    /// - `DuplicateAgent` / `AgentNotFound` on a bookkeeping invariant violation
    /// - `Io` if the sink fails while flushing removed agents. The step is
    ///   still fully committed; the rejected blocks are retried on the next
    ///   flush.
    pub fn step(&mut self) -> Result<StepResult, SimulationError> {
        self.pending_births.clear();
        self.pending_deaths.clear();

        let now = self.clock.advance();
        let live_before = self.live_agents.len();

        let snapshot = self.position_snapshot();
        let computed = compute_outcomes(
            self.live_agents.values_mut().collect(),
            &snapshot,
            now,
            self.sampler.as_ref(),
        );

        let mut result = self.commit_phase(now, computed)?;
        result.live_before = live_before;
        result.live_after = self.live_agents.len();

        info!(
            "t={} live {} -> {} ({} divisions, {} deaths, {} blocked)",
            now, live_before, result.live_after, result.divisions, result.deaths, result.blocked
        );

        // (e) write after the registry is settled
        self.flush_unflushed(now)?;
        Ok(result)
    }

    /// Run `steps` steps back to back
    pub fn run(&mut self, steps: usize) -> Result<Vec<StepResult>, SimulationError> {
        (0..steps).map(|_| self.step()).collect()
    }

    fn commit_phase(&mut self, now: Time, computed: Vec<Computed>) -> Result<StepResult, SimulationError> {
        let mut result = StepResult {
            time: now,
            ..Default::default()
        };

        // (a) stage transitions in ascending id order
        for Computed { id, neighbors, outcome } in computed {
            let agent = self
                .live_agents
                .get(&id)
                .ok_or(SimulationError::AgentNotFound(id))?;

            if let Some(placement) = agent.last_placement().filter(|p| !p.placed) {
                result.blocked += 1;
                self.event_log.log(Event::PlacementBlocked {
                    time: now,
                    agent_id: id,
                    attempts: placement.attempts,
                    neighbors,
                });
            }
            if matches!(
                agent.status(),
                StatusHint::WantsDivide | StatusHint::BlockedWantsDivide
            ) {
                self.event_log.log(Event::DivisionDeferred {
                    time: now,
                    agent_id: id,
                    neighbors,
                });
            }

            match outcome {
                Outcome::Moved => {}
                Outcome::Divide([spec_a, spec_b]) => {
                    let id_a = self.allocate_id();
                    let id_b = self.allocate_id();
                    self.pending_births
                        .push(Agent::from_child_spec(id_a, id, spec_a, self.params));
                    self.pending_births
                        .push(Agent::from_child_spec(id_b, id, spec_b, self.params));
                    self.pending_deaths.push(id);
                    self.event_log.log(Event::Divided {
                        time: now,
                        agent_id: id,
                        daughter_ids: [id_a, id_b],
                    });
                    result.divisions += 1;
                }
                Outcome::Died => {
                    self.pending_deaths.push(id);
                    self.event_log.log(Event::Died {
                        time: now,
                        agent_id: id,
                    });
                    result.deaths += 1;
                }
            }
        }

        // (b) make all tentative positions visible at once
        for agent in self.live_agents.values_mut() {
            agent.commit();
        }

        // (c) remove and queue histories
        for id in std::mem::take(&mut self.pending_deaths) {
            let agent = self.deregister(id)?;
            self.queue_history(agent);
        }

        // (d) admit daughters
        for mut daughter in std::mem::take(&mut self.pending_births) {
            if self.config.genesis_policy == GenesisPolicy::AllAgents {
                daughter.record_genesis();
            }
            self.register(daughter)?;
            result.births += 1;
        }

        Ok(result)
    }

    fn queue_history(&mut self, mut agent: Agent) {
        let records = agent.export_history();
        if !records.is_empty() {
            self.unflushed.push_back(records);
        }
    }

    /// Write queued blocks in order; a rejected block stays at the front
    fn flush_unflushed(&mut self, now: Time) -> Result<(), SimulationError> {
        while let Some(records) = self.unflushed.front() {
            self.sink.write_block(records)?;
            let agent_id = records.first().map_or(0, |r| r.id);
            let count = records.len();
            self.unflushed.pop_front();
            self.event_log.log(Event::HistoryFlushed {
                time: now,
                agent_id,
                records: count,
            });
        }
        Ok(())
    }

    /// Flush every live agent's history and release the sink
    pub fn shutdown(mut self) -> Result<S, SimulationError> {
        let now = self.clock.now();
        let remaining = std::mem::take(&mut self.live_agents);
        info!("shutdown at t={}: flushing {} live agents", now, remaining.len());

        for (_, agent) in remaining {
            self.queue_history(agent);
        }
        self.flush_unflushed(now)?;
        self.sink.finish()?;
        Ok(self.sink)
    }

    /// Finish the sink without flushing live agents
    ///
    /// Pairs with [`Population::checkpoint`]: live histories, and any
    /// blocks still queued after a failed write, travel inside the
    /// checkpoint and are flushed by the resumed run instead.
    pub fn suspend(mut self) -> Result<S, SimulationError> {
        info!(
            "suspended at t={} with {} live agents",
            self.clock.now(),
            self.live_agents.len()
        );
        self.sink.finish()?;
        Ok(self.sink)
    }

    // ========================================================================
    // Checkpointing
    // ========================================================================

    /// Capture the full population state
    pub fn snapshot(&self) -> Result<PopulationSnapshot, SimulationError> {
        Ok(PopulationSnapshot {
            version: PopulationSnapshot::VERSION,
            time: self.clock.now(),
            next_id: self.next_id_counter,
            roots_seeded: self.roots_seeded,
            rng: self.rng.clone(),
            config_hash: compute_config_hash(&self.config)?,
            agents: self.live_agents.values().cloned().collect(),
            unflushed: self.unflushed.iter().cloned().collect(),
        })
    }

    /// Serialize the full population state to JSON
    pub fn checkpoint(&self) -> Result<String, SimulationError> {
        self.snapshot()?.to_json()
    }

    /// Rebuild a population from a JSON checkpoint
    pub fn restore(config: SimulationConfig, json: &str, sink: S) -> Result<Self, SimulationError> {
        Self::restore_with_sampler(config, json, Box::new(GaussianDisplacement), sink)
    }

    /// Rebuild a population from a JSON checkpoint with an injected sampler
    pub fn restore_with_sampler(
        config: SimulationConfig,
        json: &str,
        sampler: Box<dyn DisplacementSampler>,
        sink: S,
    ) -> Result<Self, SimulationError> {
        let snapshot = PopulationSnapshot::from_json(json)?;
        let actual = compute_config_hash(&config)?;
        if snapshot.config_hash != actual {
            return Err(SimulationError::ConfigMismatch {
                expected: snapshot.config_hash,
                actual,
            });
        }
        validate_snapshot(&snapshot)?;

        let mut population = Self::with_components(config, snapshot.rng, sampler, sink)?;
        population.clock = SimulationClock::starting_at(snapshot.time);
        population.next_id_counter = snapshot.next_id;
        population.roots_seeded = snapshot.roots_seeded;
        for agent in snapshot.agents {
            population.register(agent)?;
        }
        population.unflushed = snapshot.unflushed.into();
        info!(
            "restored {} agents at t={}",
            population.live_agents.len(),
            snapshot.time
        );
        Ok(population)
    }
}

/// Labels end up as the last tab-separated trace field
fn validate_label(label: &str) -> Result<(), SimulationError> {
    if label.is_empty() || label.contains(&['\t', '\n', '\r'][..]) {
        return Err(SimulationError::InvalidConfig(format!(
            "label {:?} must be non-empty and free of tabs and line breaks",
            label
        )));
    }
    Ok(())
}

// ============================================================================
// Computation phase
// ============================================================================

fn compute_one(
    agent: &mut Agent,
    snapshot: &PositionSnapshot,
    now: Time,
    sampler: &dyn DisplacementSampler,
) -> Computed {
    let neighbors = snapshot.neighbors_in_box(agent.id(), &agent.position(), agent.params().search_radius);
    let outcome = agent.compute_next_state(&neighbors, now, sampler);
    Computed {
        id: agent.id(),
        neighbors: neighbors.len(),
        outcome,
    }
}

/// Let every agent compute against the frozen snapshot
///
/// Agents only read the snapshot and write their own tentative state, so
/// the order (or parallelism) of evaluation does not affect the result.
/// Output is sorted by id.
pub(crate) fn compute_outcomes(
    agents: Vec<&mut Agent>,
    snapshot: &PositionSnapshot,
    now: Time,
    sampler: &dyn DisplacementSampler,
) -> Vec<Computed> {
    #[cfg(feature = "parallel")]
    let mut computed: Vec<Computed> = agents
        .into_par_iter()
        .map(|agent| compute_one(agent, snapshot, now, sampler))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut computed: Vec<Computed> = agents
        .into_iter()
        .map(|agent| compute_one(agent, snapshot, now, sampler))
        .collect();

    computed.sort_by_key(|c| c.id);
    computed
}

// Manual Debug implementation (the sink need not implement Debug)
impl<S: TraceSink> std::fmt::Debug for Population<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Population")
            .field("now", &self.clock.now())
            .field("live_agents", &self.live_agents.len())
            .field("next_id", &self.next_id_counter)
            .field("sampler", &self.sampler)
            .field("event_count", &self.event_log.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySink;
    use crate::placement::FixedDisplacement;

    fn population() -> Population<MemorySink> {
        Population::new(SimulationConfig::default(), MemorySink::new()).unwrap()
    }

    #[test]
    fn test_allocate_id_is_monotonic() {
        let mut pop = population();
        assert_eq!(pop.allocate_id(), 1);
        assert_eq!(pop.allocate_id(), 2);
        assert_eq!(pop.next_id(), 3);
    }

    #[test]
    fn test_register_duplicate_is_an_error() {
        let mut pop = population();
        let id = pop.seed(1).unwrap()[0];
        let clone = pop.get_agent(id).unwrap().clone();

        assert!(matches!(
            pop.register(clone),
            Err(SimulationError::DuplicateAgent(dup)) if dup == id
        ));
    }

    #[test]
    fn test_deregister_absent_is_an_error() {
        let mut pop = population();
        assert!(matches!(
            pop.deregister(99),
            Err(SimulationError::AgentNotFound(99))
        ));
    }

    #[test]
    fn test_seed_after_first_step_rejected() {
        let mut pop = population();
        pop.seed(1).unwrap();
        pop.step().unwrap();
        assert!(matches!(
            pop.seed(1),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_compute_order_does_not_matter() {
        let mut pop = population();
        pop.seed_at(&[
            Position::new(0.0, 0.0, 0.0),
            Position::new(2.0, 0.0, 0.0),
            Position::new(0.0, 2.5, 0.0),
            Position::new(4.0, 4.0, 0.0),
        ])
        .unwrap();

        let snapshot = pop.position_snapshot();
        let mut forward: Vec<Agent> = pop.agents().cloned().collect();
        let mut backward: Vec<Agent> = forward.clone();

        let out_fwd = compute_outcomes(forward.iter_mut().collect(), &snapshot, 1, &GaussianDisplacement);
        let out_bwd = compute_outcomes(
            backward.iter_mut().rev().collect(),
            &snapshot,
            1,
            &GaussianDisplacement,
        );

        let summary = |c: &[Computed]| -> Vec<(AgentId, usize, bool)> {
            c.iter()
                .map(|c| (c.id, c.neighbors, c.outcome.is_removal()))
                .collect()
        };
        assert_eq!(summary(&out_fwd), summary(&out_bwd));
        for (a, b) in forward.iter().zip(backward.iter()) {
            assert_eq!(a.pending_position(), b.pending_position());
        }
    }

    #[test]
    fn test_neighbor_query_uses_authoritative_positions() {
        let mut pop = Population::with_sampler(
            SimulationConfig::default(),
            Box::new(FixedDisplacement(Position::new(100.0, 0.0, 0.0))),
            MemorySink::new(),
        )
        .unwrap();
        let ids = pop
            .seed_at(&[Position::new(0.0, 0.0, 0.0), Position::new(4.0, 0.0, 0.0)])
            .unwrap();

        assert_eq!(pop.neighbor_query(ids[0]).unwrap(), vec![Position::new(4.0, 0.0, 0.0)]);
        pop.step().unwrap();
        // both jumped far to the right; still 4 apart
        assert_eq!(pop.neighbor_query(ids[0]).unwrap(), vec![Position::new(104.0, 0.0, 0.0)]);
        assert!(pop.neighbor_query(77).is_err());
    }

    #[test]
    fn test_step_logs_blocked_placements() {
        let config = SimulationConfig {
            min_separation: 10.0,
            ..Default::default()
        };
        let mut pop = Population::with_sampler(
            config,
            Box::new(FixedDisplacement(Position::new(0.1, 0.0, 0.0))),
            MemorySink::new(),
        )
        .unwrap();
        pop.seed_at(&[Position::new(0.0, 0.0, 0.0), Position::new(1.0, 0.0, 0.0)])
            .unwrap();

        let result = pop.step().unwrap();
        assert_eq!(result.blocked, 2);
        assert_eq!(pop.event_log().events_of_type("PlacementBlocked").len(), 2);
        // blocked agents keep their place
        assert_eq!(pop.get_agent(1).unwrap().position(), Position::ORIGIN);
    }
}
