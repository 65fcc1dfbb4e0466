//! Event logging for simulation replay and auditing.
//!
//! Captures every lifecycle transition of the population. Events enable:
//! - Debugging (why an agent divided, died or stayed put)
//! - Auditing (checking the per-step population bookkeeping)
//! - Analysis (division/death statistics without re-reading the trace)
//!
//! # Example
//!
//! ```rust
//! use cell_lineage_sim_core::models::Event;
//!
//! let event = Event::Died { time: 12, agent_id: 4 };
//! assert_eq!(event.time(), 12);
//! assert_eq!(event.event_type(), "Died");
//! ```

use crate::core::time::Time;
use crate::models::agent::AgentId;
use crate::models::position::Position;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a lifecycle change.
///
/// Events are logged in commit order within a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A lineage root was admitted before the first step
    AgentSeeded {
        time: Time,
        agent_id: AgentId,
        label: String,
        position: Position,
    },

    /// No collision-free position within the attempt budget; agent stayed put
    PlacementBlocked {
        time: Time,
        agent_id: AgentId,
        attempts: u32,
        neighbors: usize,
    },

    /// Agent was old enough to divide but too crowded
    DivisionDeferred {
        time: Time,
        agent_id: AgentId,
        neighbors: usize,
    },

    /// Mother replaced by two daughters
    Divided {
        time: Time,
        agent_id: AgentId,
        daughter_ids: [AgentId; 2],
    },

    /// Agent exceeded its lifespan and was removed
    Died { time: Time, agent_id: AgentId },

    /// An agent's full history was written to the sink
    HistoryFlushed {
        time: Time,
        agent_id: AgentId,
        records: usize,
    },
}

impl Event {
    /// Time at which this event occurred
    pub fn time(&self) -> Time {
        match self {
            Event::AgentSeeded { time, .. } => *time,
            Event::PlacementBlocked { time, .. } => *time,
            Event::DivisionDeferred { time, .. } => *time,
            Event::Divided { time, .. } => *time,
            Event::Died { time, .. } => *time,
            Event::HistoryFlushed { time, .. } => *time,
        }
    }

    /// Short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::AgentSeeded { .. } => "AgentSeeded",
            Event::PlacementBlocked { .. } => "PlacementBlocked",
            Event::DivisionDeferred { .. } => "DivisionDeferred",
            Event::Divided { .. } => "Divided",
            Event::Died { .. } => "Died",
            Event::HistoryFlushed { .. } => "HistoryFlushed",
        }
    }

    /// Agent the event is about
    pub fn agent_id(&self) -> AgentId {
        match self {
            Event::AgentSeeded { agent_id, .. }
            | Event::PlacementBlocked { agent_id, .. }
            | Event::DivisionDeferred { agent_id, .. }
            | Event::Divided { agent_id, .. }
            | Event::Died { agent_id, .. }
            | Event::HistoryFlushed { agent_id, .. } => *agent_id,
        }
    }
}

/// Append-only event log
///
/// Nothing is evicted; a long-running host drains it periodically
/// (see `Population::drain_events`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events that occurred at a given time
    pub fn events_at_time(&self, time: Time) -> Vec<&Event> {
        self.events.iter().filter(|e| e.time() == time).collect()
    }

    /// Events of a specific type (see [`Event::event_type`])
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events about a specific agent
    pub fn events_for_agent(&self, agent_id: AgentId) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.agent_id() == agent_id)
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Remove and return every event, oldest first
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
