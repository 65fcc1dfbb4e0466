//! Frozen spatial snapshot for neighbour queries
//!
//! Taken once per step before any agent computes. Every neighbour query of
//! that step reads this snapshot only, so no agent ever sees another
//! agent's tentative position.
//!
//! Queries are a linear scan with an axis-aligned box pre-filter, which is
//! plenty for tens to low hundreds of agents.

use crate::models::agent::AgentId;
use crate::models::position::Position;

/// Pre-step authoritative positions of all live agents
#[derive(Debug, Clone, Default)]
pub struct PositionSnapshot {
    entries: Vec<(AgentId, Position)>,
}

impl PositionSnapshot {
    pub fn new(entries: Vec<(AgentId, Position)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position_of(&self, id: AgentId) -> Option<Position> {
        self.entries
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, p)| *p)
    }

    /// Positions of all agents other than `id` strictly inside the box of
    /// half-width `search_radius` around `centre`
    pub fn neighbors_in_box(&self, id: AgentId, centre: &Position, search_radius: f64) -> Vec<Position> {
        self.entries
            .iter()
            .filter(|(other, _)| *other != id)
            .filter(|(_, p)| centre.box_contains(p, search_radius))
            .map(|(_, p)| *p)
            .collect()
    }
}

impl FromIterator<(AgentId, Position)> for PositionSnapshot {
    fn from_iter<I: IntoIterator<Item = (AgentId, Position)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
