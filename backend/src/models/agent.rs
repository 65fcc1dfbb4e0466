//! Agent (cell) model
//!
//! One simulated cell: identity, label, kinematic state, lifecycle timers
//! and its own trace history.
//!
//! # Step protocol
//!
//! ```text
//! compute_next_state()   placement search + lifecycle decision,
//!                        writes only pending_position / internal counters
//! commit()               pending_position -> position, append snapshot
//! export_history()       drain the snapshots when the agent is removed
//! ```
//!
//! The authoritative `position` never changes during computation, so every
//! other agent of the same step sees the pre-step value.

use crate::core::time::Time;
use crate::models::naming::{NamingPolicy, StatusHint};
use crate::models::position::Position;
use crate::models::trace::TraceRecord;
use crate::placement::{search_placement, DisplacementSampler, Placement, PlacementParams};
use crate::rng::RngManager;
use log::debug;
use serde::{Deserialize, Serialize};

/// Unique agent identifier; never reused within a run
pub type AgentId = u64;

/// `parent_id` of lineage roots
pub const ROOT_PARENT_ID: AgentId = 0;

/// Behavioural parameters shared by all agents of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Half-width of the neighbour lookup box
    pub search_radius: f64,
    /// Collision threshold between agent centres
    pub min_separation: f64,
    /// Motion scale; displacements are drawn with σ = step_size / 2
    pub step_size: f64,
    /// Placement candidates per step
    pub max_attempts: u32,
    /// Density cap: division only with at most this many neighbours
    pub max_neighbors_for_division: usize,
    /// Restrict motion and division offsets to the horizontal plane
    pub planar_only: bool,
    pub mean_division_age: f64,
    pub mean_death_age: f64,
    /// Relative jitter window of the lifecycle timers
    pub lifespan_spread: f64,
    pub naming_policy: NamingPolicy,
}

impl AgentParams {
    pub fn placement(&self) -> PlacementParams {
        PlacementParams {
            step_size: self.step_size,
            min_separation: self.min_separation,
            max_attempts: self.max_attempts,
            planar_only: self.planar_only,
        }
    }
}

/// When an agent may divide and when it must die
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleTimers {
    /// Division is possible once time exceeds this
    pub division_eligible_time: Time,
    /// The agent dies once time exceeds this (unless it divides first)
    pub death_time: Time,
}

impl LifecycleTimers {
    /// Sample both timers for an agent born at `birth_time`
    ///
    /// Each offset is `mean + N(0,1)·σ` with `σ = spread·mean/3`, clamped to
    /// `mean·[1 − spread, 1 + spread]` and truncated.
    pub fn sample(birth_time: Time, params: &AgentParams, rng: &mut RngManager) -> Self {
        let division = jittered_age(params.mean_division_age, params.lifespan_spread, rng);
        let death = jittered_age(params.mean_death_age, params.lifespan_spread, rng);
        Self {
            division_eligible_time: birth_time + division,
            death_time: birth_time + death,
        }
    }
}

fn jittered_age(mean: f64, spread: f64, rng: &mut RngManager) -> Time {
    let sigma = spread * mean / 3.0;
    let age = (rng.next_gaussian() * sigma + mean).clamp(mean * (1.0 - spread), mean * (1.0 + spread));
    age.max(0.0) as Time
}

/// Everything needed to create a daughter, minus her id
///
/// Ids are handed out by the population during commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildSpec {
    pub label: String,
    pub position: Position,
    pub birth_time: Time,
    pub timers: LifecycleTimers,
    pub rng: RngManager,
}

/// Lifecycle transition decided for one step
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Still alive, no transition
    Moved,
    /// Replaced by two daughters
    Divide([ChildSpec; 2]),
    /// Lifespan exceeded
    Died,
}

impl Outcome {
    pub fn is_removal(&self) -> bool {
        !matches!(self, Outcome::Moved)
    }
}

/// One simulated cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    parent_id: AgentId,
    /// Clean lineage label (no status hints)
    label: String,
    /// Status of the most recent computed step, shown via label hints
    status: StatusHint,

    position: Position,
    pending_position: Position,

    birth_time: Time,
    current_time: Time,
    timers: LifecycleTimers,

    params: AgentParams,
    /// Per-agent random stream (movement, division geometry, daughters)
    rng: RngManager,

    #[serde(skip)]
    last_placement: Option<Placement>,

    history: Vec<TraceRecord>,
}

impl Agent {
    /// Create a lineage root
    pub fn root(
        id: AgentId,
        label: String,
        position: Position,
        birth_time: Time,
        timers: LifecycleTimers,
        params: AgentParams,
        rng: RngManager,
    ) -> Self {
        Self {
            id,
            parent_id: ROOT_PARENT_ID,
            label,
            status: StatusHint::Clean,
            position,
            pending_position: position,
            birth_time,
            current_time: birth_time,
            timers,
            params,
            rng,
            last_placement: None,
            history: Vec::new(),
        }
    }

    /// Create a daughter from a division spec
    pub fn from_child_spec(id: AgentId, parent_id: AgentId, spec: ChildSpec, params: AgentParams) -> Self {
        Self {
            id,
            parent_id,
            label: spec.label,
            status: StatusHint::Clean,
            position: spec.position,
            pending_position: spec.position,
            birth_time: spec.birth_time,
            current_time: spec.birth_time,
            timers: spec.timers,
            params,
            rng: spec.rng,
            last_placement: None,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn parent_id(&self) -> AgentId {
        self.parent_id
    }

    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }

    /// Clean lineage label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label as it will appear in the next trace record
    pub fn display_label(&self) -> String {
        self.params.naming_policy.decorate(&self.label, self.status)
    }

    pub fn status(&self) -> StatusHint {
        self.status
    }

    /// Authoritative position (as of the last commit)
    pub fn position(&self) -> Position {
        self.position
    }

    /// Tentative position computed in the current step
    pub fn pending_position(&self) -> Position {
        self.pending_position
    }

    pub fn birth_time(&self) -> Time {
        self.birth_time
    }

    pub fn current_time(&self) -> Time {
        self.current_time
    }

    pub fn timers(&self) -> LifecycleTimers {
        self.timers
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn rng(&self) -> &RngManager {
        &self.rng
    }

    /// Placement result of the most recent computed step
    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    pub fn history(&self) -> &[TraceRecord] {
        &self.history
    }

    /// Record the agent's state at its birth time, if not recorded yet
    pub fn record_genesis(&mut self) {
        self.append_snapshot();
    }

    /// Compute the tentative next state against a frozen neighbour set
    ///
    /// `neighbors` are the pre-step positions of the other agents inside
    /// this agent's search box. Only `pending_position` and internal
    /// counters change; `position` stays untouched until [`Agent::commit`].
    ///
    /// An agent that is already at `now` (a daughter in her birth step)
    /// holds her birth position and reports [`Outcome::Moved`].
    pub fn compute_next_state(
        &mut self,
        neighbors: &[Position],
        now: Time,
        sampler: &dyn DisplacementSampler,
    ) -> Outcome {
        if self.current_time >= now {
            self.pending_position = self.position;
            self.status = StatusHint::Clean;
            self.last_placement = None;
            return Outcome::Moved;
        }

        let placement = search_placement(
            self.position,
            neighbors,
            &self.params.placement(),
            sampler,
            &mut self.rng,
        );
        self.pending_position = placement.position;
        self.last_placement = Some(placement);
        self.current_time += 1;

        let neighbor_count = neighbors.len();
        let blocked = !placement.placed;
        if blocked {
            debug!(
                "agent {} ({}) stays at {}: {} neighbours, {} attempts",
                self.id, self.label, self.position, neighbor_count, placement.attempts
            );
        }

        // Division is checked first and wins over death in the same step.
        if now > self.timers.division_eligible_time {
            if neighbor_count <= self.params.max_neighbors_for_division {
                self.status = StatusHint::from_flags(blocked, false);
                debug!("agent {} ({}) divides at t={}", self.id, self.label, now);
                return Outcome::Divide(self.divide(now));
            }
            self.status = StatusHint::from_flags(blocked, true);
            debug!(
                "agent {} ({}) defers division: {} neighbours",
                self.id, self.label, neighbor_count
            );
        } else {
            self.status = StatusHint::from_flags(blocked, false);
        }

        if now > self.timers.death_time {
            debug!("agent {} ({}) dies at t={}", self.id, self.label, now);
            return Outcome::Died;
        }

        Outcome::Moved
    }

    /// Apply the tentative position and append one history snapshot
    pub fn commit(&mut self) {
        self.position = self.pending_position;
        self.append_snapshot();
    }

    /// Drain the full ordered history
    pub fn export_history(&mut self) -> Vec<TraceRecord> {
        std::mem::take(&mut self.history)
    }

    fn append_snapshot(&mut self) {
        let already_recorded = self
            .history
            .last()
            .is_some_and(|last| last.time >= self.current_time);
        if already_recorded {
            return;
        }
        self.history.push(TraceRecord {
            time: self.current_time,
            position: self.position,
            id: self.id,
            parent_id: self.parent_id,
            label: self.display_label(),
        });
    }

    /// Build the two daughter specs around the tentative position
    fn divide(&mut self, now: Time) -> [ChildSpec; 2] {
        let half = self.params.min_separation / 2.0;
        let azimuth = self.rng.next_angle();

        let offset = if self.params.planar_only {
            Position::new(half * azimuth.cos(), half * azimuth.sin(), 0.0)
        } else {
            // same total length, part of it tilted out of the plane
            let dz = self.rng.next_f64();
            let scale = half / (1.0 + dz * dz).sqrt();
            Position::new(scale * azimuth.cos(), scale * azimuth.sin(), scale * dz)
        };

        let birth_time = now + 1;
        let (label_a, label_b) = self.params.naming_policy.daughter_labels(&self.label);
        let centre = self.pending_position;

        let mut make = |label: String, position: Position| {
            let timers = LifecycleTimers::sample(birth_time, &self.params, &mut self.rng);
            ChildSpec {
                label,
                position,
                birth_time,
                timers,
                rng: self.rng.fork(),
            }
        };

        [make(label_a, centre - offset), make(label_b, centre + offset)]
    }
}
