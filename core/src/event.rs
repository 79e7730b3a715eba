//! Simulation events.
//!
//! RULE: Every state change worth observing outside a frame is emitted
//! as an event. The engine records subsystem events in its in-memory
//! log; nothing is persisted.

use crate::{
    kind::{Kind, KindCounts},
    types::{EntityId, RunId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    RunInitialized {
        run_id: RunId,
        seed: u64,
        population: usize,
    },
    SimulationReset {
        run_id: RunId,
        generation: u64,
    },
    GameConcluded {
        tick: Tick,
        winner: Kind,
        counts: KindCounts,
    },

    // ── Steering events ────────────────────────────
    EntityConverted {
        tick: Tick,
        attacker: EntityId,
        defeated: EntityId,
        from: Kind,
        to: Kind,
    },
    WallEscapeStarted {
        tick: Tick,
        entity: EntityId,
        direction_x: f64,
        direction_y: f64,
    },
    WallEscapeEnded {
        tick: Tick,
        entity: EntityId,
    },
}

impl SimEvent {
    /// Stable name for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TickStarted { .. }       => "tick_started",
            Self::TickCompleted { .. }     => "tick_completed",
            Self::RunInitialized { .. }    => "run_initialized",
            Self::SimulationReset { .. }   => "simulation_reset",
            Self::GameConcluded { .. }     => "game_concluded",
            Self::EntityConverted { .. }   => "entity_converted",
            Self::WallEscapeStarted { .. } => "wall_escape_started",
            Self::WallEscapeEnded { .. }   => "wall_escape_ended",
        }
    }
}

/// One recorded event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub run_id: RunId,
    /// Restart count; ticks start over from 0 after each restart.
    pub generation: u64,
    pub tick: Tick,
    pub subsystem: String,
    pub event_type: String,
    pub payload: String, // JSON-serialized SimEvent
}
