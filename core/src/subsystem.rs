//! Subsystem trait.
//!
//! RULE: Every per-frame behaviour implements SimSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every tick, after the termination check.

use crate::{
    error::SimResult,
    event::SimEvent,
    rng::SubsystemRng,
    store::SimStore,
    types::Tick,
};
use std::any::Any;

/// The contract every subsystem must fulfill.
pub trait SimSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `tick`:      the current tick number
    /// - `store`:     the live entity store, mutated in place
    /// - `events_in`: events emitted by earlier subsystems this tick
    /// - `rng`:       this subsystem's seeded RNG for this tick
    ///
    /// Returns a vec of new events to add to the tick's event log.
    fn update(
        &mut self,
        tick: Tick,
        store: &mut SimStore,
        events_in: &[SimEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>>;

    /// Drop any state carried between ticks. Called on restart.
    fn reset(&mut self) {}

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
