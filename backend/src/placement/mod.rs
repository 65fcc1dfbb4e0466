//! Collision-avoiding placement search
//!
//! An agent looks for a new position within a fixed attempt budget:
//!
//! ```text
//! attempt 1, 3, 5, ...  fresh displacement ~ N(0, step_size/2) per axis
//! attempt 2, 4, 6, ...  previous displacement halved
//! ```
//!
//! A candidate is accepted iff its squared distance to every neighbour is
//! at least `min_separation²` (equality accepted). When the budget runs out
//! the agent stays where it is; that is a normal outcome, not an error.

use crate::models::position::Position;
use crate::rng::RngManager;
use log::trace;
use std::fmt;

/// Source of fresh placement displacements
///
/// The default is [`GaussianDisplacement`]. Scripted runs and tests inject
/// [`FixedDisplacement`] to make every move predictable.
pub trait DisplacementSampler: Send + Sync + fmt::Debug {
    /// Draw a displacement with per-axis standard deviation `sigma`.
    /// With `planar` set the vertical component must be zero.
    fn sample(&self, rng: &mut RngManager, sigma: f64, planar: bool) -> Position;
}

/// Zero-mean Gaussian displacement
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianDisplacement;

impl DisplacementSampler for GaussianDisplacement {
    fn sample(&self, rng: &mut RngManager, sigma: f64, planar: bool) -> Position {
        let x = rng.next_gaussian() * sigma;
        let y = rng.next_gaussian() * sigma;
        let z = if planar {
            0.0
        } else {
            rng.next_gaussian() * sigma
        };
        Position::new(x, y, z)
    }
}

/// Always returns the same displacement, ignoring the random stream
#[derive(Debug, Clone, Copy)]
pub struct FixedDisplacement(pub Position);

impl DisplacementSampler for FixedDisplacement {
    fn sample(&self, _rng: &mut RngManager, _sigma: f64, _planar: bool) -> Position {
        self.0
    }
}

/// Movement parameters of one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    pub step_size: f64,
    pub min_separation: f64,
    pub max_attempts: u32,
    pub planar_only: bool,
}

/// Result of a placement search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Accepted candidate, or the unchanged start position when nothing was accepted
    pub position: Position,
    /// Number of candidates evaluated
    pub attempts: u32,
    /// False when the agent had to stay put
    pub placed: bool,
}

/// True iff `candidate` keeps at least `min_separation` from every neighbour
pub fn is_collision_free(candidate: &Position, neighbors: &[Position], min_separation: f64) -> bool {
    let min_sq = min_separation * min_separation;
    neighbors
        .iter()
        .all(|n| n.distance_squared(candidate) >= min_sq)
}

/// Search for a collision-free position around `origin`
pub fn search_placement(
    origin: Position,
    neighbors: &[Position],
    params: &PlacementParams,
    sampler: &dyn DisplacementSampler,
    rng: &mut RngManager,
) -> Placement {
    let sigma = params.step_size / 2.0;
    let mut displacement = Position::ORIGIN;

    for attempt in 1..=params.max_attempts {
        displacement = if attempt % 2 == 1 {
            sampler.sample(rng, sigma, params.planar_only)
        } else {
            displacement * 0.5
        };

        let candidate = origin + displacement;
        let free = is_collision_free(&candidate, neighbors, params.min_separation);
        trace!(
            "placement attempt {}/{}: candidate {} free={}",
            attempt,
            params.max_attempts,
            candidate,
            free
        );

        if free {
            return Placement {
                position: candidate,
                attempts: attempt,
                placed: true,
            };
        }
    }

    Placement {
        position: origin,
        attempts: params.max_attempts,
        placed: false,
    }
}
