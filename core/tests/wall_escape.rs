//! Evasion near the arena edges, driven one entity at a time.

use glam::DVec2;
use rps_core::{
    arena::Arena,
    config::SimConfig,
    event::SimEvent,
    kind::Kind,
    rng::{RngBank, SubsystemRng, SubsystemSlot},
    steering_subsystem::{SteerOutcome, SteeringSubsystem},
    store::{SimStore, WallEscape},
    types::EntityId,
};

fn rng(tick: u64) -> SubsystemRng {
    RngBank::new(2024).for_subsystem_at_tick(SubsystemSlot::Steering, tick)
}

fn steer(
    steering: &mut SteeringSubsystem,
    store: &mut SimStore,
    id: EntityId,
    tick: u64,
) -> (SteerOutcome, Vec<SimEvent>) {
    let mut events = Vec::new();
    let outcome = steering.steer(tick, store, id, &mut rng(tick), &mut events).unwrap();
    (outcome, events)
}

#[test]
fn corner_entity_escapes_away_from_both_edges() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    // No scissors, so the rock can only evade.
    let rock = store.spawn(Kind::Rock, DVec2::new(5.0, 5.0));
    store.spawn(Kind::Paper, DVec2::new(300.0, 300.0));

    let (outcome, events) = steer(&mut steering, &mut store, rock, 1);

    let escape = store.escape_state(rock).unwrap().expect("rock should be escaping");
    assert_eq!(escape.direction_x, 1.0);
    assert!((-1.0..=1.0).contains(&escape.direction_y));
    assert_eq!(escape.direction_y, 1.0, "both axes violated, both push inward");
    assert_eq!(
        events,
        vec![SimEvent::WallEscapeStarted { tick: 1, entity: rock, direction_x: 1.0, direction_y: 1.0 }]
    );

    let SteerOutcome::Moved { from, to } = outcome else {
        panic!("expected a move");
    };
    assert!(to.x > from.x && to.y > from.y, "moved toward the corner: {from:?} -> {to:?}");
    assert!((to.distance(from) - config.move_speed).abs() < 1e-9);
}

#[test]
fn escape_heading_is_fixed_until_interior_then_flees_same_frame() {
    let config = SimConfig::default_test();
    let arena = Arena::from_config(&config);
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let rock = store.spawn(Kind::Rock, DVec2::new(5.0, 5.0));
    let paper_at = DVec2::new(300.0, 300.0);
    store.spawn(Kind::Paper, paper_at);

    steer(&mut steering, &mut store, rock, 1);
    let chosen = store.escape_state(rock).unwrap().unwrap();

    let mut exited = false;
    for tick in 2..200 {
        let before = store.entity(rock).unwrap().position;
        let (outcome, events) = steer(&mut steering, &mut store, rock, tick);

        if arena.is_interior(before) {
            assert_eq!(store.escape_state(rock).unwrap(), None, "escape must end on reaching the interior");
            assert_eq!(events, vec![SimEvent::WallEscapeEnded { tick, entity: rock }]);

            // The exit frame moves straight away from the paper.
            let expected = before + (before - paper_at).normalize() * config.move_speed;
            let SteerOutcome::Moved { to, .. } = outcome else {
                panic!("expected a flee move");
            };
            assert!((to - expected).length() < 1e-9, "flee went to {to:?}, expected {expected:?}");
            exited = true;
            break;
        }

        assert_eq!(store.escape_state(rock).unwrap(), Some(chosen), "heading changed mid-escape");
        let SteerOutcome::Moved { from, to } = outcome else {
            panic!("expected an escape move");
        };
        let expected = from + chosen.heading().normalize() * config.move_speed;
        assert!((to - expected).length() < 1e-9);
    }
    assert!(exited, "entity never reached the interior");
    assert_eq!(steering.stats.escapes_started, 1);
    assert_eq!(steering.stats.escapes_ended, 1);
}

#[test]
fn single_edge_escape_randomizes_the_free_axis() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let scissors = store.spawn(Kind::Scissors, DVec2::new(250.0, 465.0));
    store.spawn(Kind::Rock, DVec2::new(250.0, 200.0));

    steer(&mut steering, &mut store, scissors, 1);

    let escape = store.escape_state(scissors).unwrap().unwrap();
    assert_eq!(escape.direction_y, -1.0);
    assert!((-1.0..1.0).contains(&escape.direction_x));
}

#[test]
fn escape_ignores_predators() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let paper = store.spawn(Kind::Paper, DVec2::new(20.0, 250.0));
    // The predator sits right in the escape path.
    store.spawn(Kind::Scissors, DVec2::new(60.0, 250.0));
    store
        .set_escape_state(paper, Some(WallEscape { direction_x: 1.0, direction_y: 0.0 }))
        .unwrap();

    let (outcome, _) = steer(&mut steering, &mut store, paper, 1);

    assert_eq!(
        outcome,
        SteerOutcome::Moved { from: DVec2::new(20.0, 250.0), to: DVec2::new(22.0, 250.0) }
    );
}

#[test]
fn interior_evader_flees_nearest_predator() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let rock = store.spawn(Kind::Rock, DVec2::new(200.0, 200.0));
    store.spawn(Kind::Paper, DVec2::new(200.0, 260.0));
    store.spawn(Kind::Paper, DVec2::new(400.0, 400.0));

    let (outcome, events) = steer(&mut steering, &mut store, rock, 1);

    assert!(events.is_empty());
    let SteerOutcome::Moved { to, .. } = outcome else {
        panic!("expected a flee move");
    };
    assert!((to - DVec2::new(200.0, 198.0)).length() < 1e-9, "fled to {to:?}");
    assert_eq!(store.escape_state(rock).unwrap(), None);
}

#[test]
fn coincident_predator_means_no_movement() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let rock = store.spawn(Kind::Rock, DVec2::new(200.0, 200.0));
    store.spawn(Kind::Paper, DVec2::new(200.0, 200.0));

    let (outcome, _) = steer(&mut steering, &mut store, rock, 1);

    assert_eq!(outcome, SteerOutcome::Held);
    assert_eq!(store.entity(rock).unwrap().position, DVec2::new(200.0, 200.0));
}

#[test]
fn lone_kind_near_edge_still_escapes_but_holds_in_interior() {
    let config = SimConfig::default_test();
    let mut steering = SteeringSubsystem::new(&config);
    let mut store = SimStore::new();
    let edge = store.spawn(Kind::Rock, DVec2::new(470.0, 250.0));
    let middle = store.spawn(Kind::Rock, DVec2::new(250.0, 250.0));

    let (edge_outcome, _) = steer(&mut steering, &mut store, edge, 1);
    let (middle_outcome, _) = steer(&mut steering, &mut store, middle, 1);

    assert!(matches!(edge_outcome, SteerOutcome::Moved { .. }));
    assert_eq!(store.escape_state(edge).unwrap().unwrap().direction_x, -1.0);
    assert_eq!(middle_outcome, SteerOutcome::Held);
}
