//! Agent behaviour tests
//!
//! Exercises a single agent through compute/commit/export without a
//! population around it.

use cell_lineage_sim_core::{
    Agent, AgentParams, FixedDisplacement, GaussianDisplacement, LifecycleTimers, NamingPolicy,
    Outcome, Position, RngManager, StatusHint, ROOT_PARENT_ID,
};

fn params() -> AgentParams {
    AgentParams {
        search_radius: 5.0,
        min_separation: 3.0,
        step_size: 1.0,
        max_attempts: 5,
        max_neighbors_for_division: 6,
        planar_only: true,
        mean_division_age: 10.0,
        mean_death_age: 50.0,
        lifespan_spread: 0.6,
        naming_policy: NamingPolicy::LineageEncoded,
    }
}

fn root(timers: LifecycleTimers, params: AgentParams) -> Agent {
    Agent::root(
        1,
        "1".to_string(),
        Position::ORIGIN,
        0,
        timers,
        params,
        RngManager::new(2024),
    )
}

fn timers(division: usize, death: usize) -> LifecycleTimers {
    LifecycleTimers {
        division_eligible_time: division,
        death_time: death,
    }
}

#[test]
fn test_root_identity() {
    let agent = root(timers(10, 50), params());
    assert_eq!(agent.id(), 1);
    assert_eq!(agent.parent_id(), ROOT_PARENT_ID);
    assert!(agent.is_root());
    assert_eq!(agent.label(), "1");
    assert!(agent.history().is_empty());
}

#[test]
fn test_genesis_record_then_steps_are_gap_free() {
    let mut agent = root(timers(100, 100), params());
    agent.record_genesis();

    for now in 1..=5 {
        let outcome = agent.compute_next_state(&[], now, &GaussianDisplacement);
        assert_eq!(outcome, Outcome::Moved);
        agent.commit();
    }

    let times: Vec<usize> = agent.history().iter().map(|r| r.time).collect();
    assert_eq!(times, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_record_genesis_twice_is_idempotent() {
    let mut agent = root(timers(100, 100), params());
    agent.record_genesis();
    agent.record_genesis();
    assert_eq!(agent.history().len(), 1);
}

#[test]
fn test_not_eligible_before_division_time() {
    // division requires now > division_eligible_time
    let mut agent = root(timers(1, 100), params());
    let outcome = agent.compute_next_state(&[], 1, &GaussianDisplacement);
    assert_eq!(outcome, Outcome::Moved);

    agent.commit();
    let outcome = agent.compute_next_state(&[], 2, &GaussianDisplacement);
    assert!(matches!(outcome, Outcome::Divide(_)));
}

#[test]
fn test_death_needs_strictly_later_time() {
    let mut agent = root(timers(100, 1), params());
    assert_eq!(agent.compute_next_state(&[], 1, &GaussianDisplacement), Outcome::Moved);
    agent.commit();
    assert_eq!(agent.compute_next_state(&[], 2, &GaussianDisplacement), Outcome::Died);
}

#[test]
fn test_density_cap_defers_division() {
    let mut p = params();
    p.max_neighbors_for_division = 1;
    let mut agent = root(timers(0, 100), p);

    let crowd = [Position::new(4.0, 4.0, 0.0), Position::new(-4.0, -4.0, 0.0)];
    let outcome = agent.compute_next_state(&crowd, 1, &FixedDisplacement(Position::ORIGIN));

    assert_eq!(outcome, Outcome::Moved);
    assert_eq!(agent.status(), StatusHint::WantsDivide);
}

#[test]
fn test_neighbor_count_equal_to_cap_allows_division() {
    let mut p = params();
    p.max_neighbors_for_division = 2;
    let mut agent = root(timers(0, 100), p);

    let crowd = [Position::new(4.0, 4.0, 0.0), Position::new(-4.0, -4.0, 0.0)];
    let outcome = agent.compute_next_state(&crowd, 1, &FixedDisplacement(Position::ORIGIN));
    assert!(matches!(outcome, Outcome::Divide(_)));
}

#[test]
fn test_daughters_straddle_pending_position() {
    let mut agent = root(timers(0, 100), params());
    let step = Position::new(0.5, 0.0, 0.0);

    let Outcome::Divide([a, b]) = agent.compute_next_state(&[], 1, &FixedDisplacement(step)) else {
        panic!("expected division");
    };

    let midpoint = (a.position + b.position) * 0.5;
    assert!(midpoint.distance(&step) < 1e-9);
    assert!((a.position.distance(&b.position) - 3.0).abs() < 1e-9);
}

#[test]
fn test_volumetric_division_keeps_separation() {
    let mut p = params();
    p.planar_only = false;
    let mut agent = root(timers(0, 100), p);

    let Outcome::Divide([a, b]) = agent.compute_next_state(&[], 1, &GaussianDisplacement) else {
        panic!("expected division");
    };
    assert!((a.position.distance(&b.position) - 3.0).abs() < 1e-9);
    assert_ne!(a.position.z, b.position.z);
}

#[test]
fn test_fixed_symbol_daughters() {
    let mut p = params();
    p.naming_policy = NamingPolicy::FixedSymbol;
    let mut agent = Agent::root(
        1,
        "M".to_string(),
        Position::ORIGIN,
        0,
        timers(0, 100),
        p,
        RngManager::new(1),
    );

    let Outcome::Divide([a, b]) = agent.compute_next_state(&[], 1, &GaussianDisplacement) else {
        panic!("expected division");
    };
    assert_eq!(a.label, "M");
    assert_eq!(b.label, "M");
}

#[test]
fn test_prepended_hint_for_blocked_and_wanting() {
    let mut p = params();
    p.naming_policy = NamingPolicy::LineageWithPrependedHints;
    p.max_neighbors_for_division = 0;
    let mut agent = root(timers(0, 100), p);

    let neighbors = [Position::new(1.0, 0.0, 0.0)];
    let outcome = agent.compute_next_state(&neighbors, 1, &FixedDisplacement(Position::new(0.2, 0.0, 0.0)));
    assert_eq!(outcome, Outcome::Moved);
    assert_eq!(agent.status(), StatusHint::BlockedWantsDivide);

    agent.commit();
    assert_eq!(agent.history()[0].label, "BW_1");
    assert_eq!(agent.position(), Position::ORIGIN);
}

#[test]
fn test_daughter_from_spec() {
    let mut agent = root(timers(0, 100), params());
    let Outcome::Divide([a, _]) = agent.compute_next_state(&[], 1, &GaussianDisplacement) else {
        panic!("expected division");
    };
    let daughter = Agent::from_child_spec(7, agent.id(), a.clone(), params());

    assert_eq!(daughter.id(), 7);
    assert_eq!(daughter.parent_id(), 1);
    assert_eq!(daughter.label(), "1a");
    assert_eq!(daughter.birth_time(), 2);
    assert_eq!(daughter.current_time(), 2);
    assert_eq!(daughter.position(), a.position);
    assert!(daughter.history().is_empty());
}
