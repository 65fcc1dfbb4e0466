//! Time management for the simulation
//!
//! The simulation advances in discrete steps of exactly one time unit.
//! The clock is owned by the population and only moves forward.

use serde::{Deserialize, Serialize};

/// Discrete simulation time (one unit per step)
pub type Time = usize;

/// Monotonic step clock
///
/// # Example
/// ```
/// use cell_lineage_sim_core::SimulationClock;
///
/// let mut clock = SimulationClock::new();
/// assert_eq!(clock.now(), 0);
///
/// clock.advance();
/// assert_eq!(clock.now(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Steps elapsed since seeding
    current_time: Time,
}

impl SimulationClock {
    /// Create a clock at time 0
    pub fn new() -> Self {
        Self { current_time: 0 }
    }

    /// Resume a clock at a given time (checkpoint restore)
    pub fn starting_at(time: Time) -> Self {
        Self { current_time: time }
    }

    /// Advance by exactly one step and return the new time
    pub fn advance(&mut self) -> Time {
        self.current_time += 1;
        self.current_time
    }

    /// Current simulation time
    pub fn now(&self) -> Time {
        self.current_time
    }

    /// True before the first step has run
    pub fn is_at_genesis(&self) -> bool {
        self.current_time == 0
    }
}
