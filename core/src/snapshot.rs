//! Per-frame views handed to presentation collaborators.
//!
//! The core never draws anything. After every tick it exposes a
//! FrameSnapshot, and when the game concludes it reports the winner,
//! both through a FrameSink supplied by the caller.

use crate::{
    kind::{Kind, KindCounts},
    store::SimStore,
    types::{EntityId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id:   EntityId,
    pub kind: Kind,
    pub x:    f64,
    pub y:    f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick:     Tick,
    pub counts:   KindCounts,
    pub winner:   Option<Kind>,
    pub entities: Vec<EntitySnapshot>,
}

impl FrameSnapshot {
    pub fn capture(tick: Tick, store: &SimStore, winner: Option<Kind>) -> Self {
        Self {
            tick,
            counts: store.counts(),
            winner,
            entities: store
                .entities()
                .iter()
                .map(|e| EntitySnapshot {
                    id:   e.id,
                    kind: e.kind,
                    x:    e.position.x,
                    y:    e.position.y,
                })
                .collect(),
        }
    }
}

/// Presentation side of the loop: redraws frames and announces the winner.
pub trait FrameSink {
    fn on_frame(&mut self, frame: &FrameSnapshot);

    fn on_winner(&mut self, winner: Kind, frame: &FrameSnapshot);
}

/// A sink that ignores everything. Useful for headless fast-forward.
pub struct NullSink;

impl FrameSink for NullSink {
    fn on_frame(&mut self, _frame: &FrameSnapshot) {}
    fn on_winner(&mut self, _winner: Kind, _frame: &FrameSnapshot) {}
}
