//! Restart and control commands.

use glam::DVec2;
use rps_core::{
    command::ControlCommand,
    config::SimConfig,
    engine::{SimEngine, TickOutcome},
    kind::Kind,
    steering_subsystem::SteeringStats,
    store::SimStore,
};

#[test]
fn restart_repopulates_with_a_fresh_layout() {
    let config = SimConfig { population_per_kind: 5, ..SimConfig::default() };
    let mut engine = SimEngine::build("restart".into(), 77, config).unwrap();
    let first_layout = engine.frame();

    engine.run_ticks(120).unwrap();
    assert!(engine.steering_stats().unwrap().chase_steps > 0);

    engine.apply_command(&ControlCommand::Restart).unwrap();

    let frame = engine.frame();
    assert_eq!(engine.generation(), 1);
    assert_eq!(frame.tick, 0);
    assert_eq!(frame.winner, None);
    assert_eq!(frame.entities.len(), 15);
    for kind in Kind::ALL {
        assert_eq!(frame.counts.get(kind), 5);
    }
    assert_ne!(frame.entities, first_layout.entities, "restart reused the old layout");
    assert_eq!(engine.steering_stats(), Some(SteeringStats::default()));
    assert!(engine.store.entities().iter().all(|e| e.escape.is_none()));

    let reset_entries: Vec<_> = engine.events_for_tick(0);
    assert_eq!(reset_entries.len(), 1);
    assert_eq!(reset_entries[0].event_type, "simulation_reset");

    assert!(matches!(engine.tick().unwrap(), TickOutcome::Advanced { tick: 1, .. }));
}

#[test]
fn restart_after_a_win_starts_a_new_game() {
    let mut store = SimStore::new();
    store.spawn(Kind::Scissors, DVec2::new(10.0, 10.0));

    let mut engine = SimEngine::new("won".into(), 8, SimConfig::default_test(), store).unwrap();
    assert_eq!(engine.tick().unwrap(), TickOutcome::Concluded { winner: Kind::Scissors });

    // Resuming a finished game does nothing.
    engine.apply_command(&ControlCommand::Resume).unwrap();
    assert_eq!(engine.winner(), Some(Kind::Scissors));
    assert!(engine.clock.paused);

    let winner = engine.apply_command(&ControlCommand::Restart).unwrap();
    assert_eq!(winner, None);
    assert_eq!(engine.store.len(), 3, "default_test restarts with one of each kind");
    assert!(matches!(engine.tick().unwrap(), TickOutcome::Advanced { .. }));
}

#[test]
fn pause_and_step_commands_gate_the_clock() {
    let mut engine = SimEngine::build("pause".into(), 4, SimConfig::default()).unwrap();

    engine.apply_command(&ControlCommand::Pause).unwrap();
    assert_eq!(engine.tick().unwrap(), TickOutcome::Paused);
    engine.apply_command(&ControlCommand::Step { count: 10 }).unwrap();
    assert_eq!(engine.clock.current_tick, 0, "stepping while paused runs nothing");

    engine.apply_command(&ControlCommand::Resume).unwrap();
    engine.apply_command(&ControlCommand::Step { count: 10 }).unwrap();
    assert_eq!(engine.clock.current_tick, 10);
}

#[test]
fn commands_parse_from_tagged_json() {
    let restart: ControlCommand = serde_json::from_str(r#"{ "cmd": "restart" }"#).unwrap();
    assert_eq!(restart, ControlCommand::Restart);
    let step: ControlCommand = serde_json::from_str(r#"{ "cmd": "step", "count": 3 }"#).unwrap();
    assert_eq!(step, ControlCommand::Step { count: 3 });
}

#[test]
fn invalid_config_is_rejected_at_build() {
    let config = SimConfig { edge_buffer: 300.0, ..SimConfig::default_test() };
    assert!(SimEngine::build("bad".into(), 1, config).is_err());
}
