//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one display frame.
pub type Tick = u64;

/// A stable identifier for an entity: its creation index in the store.
pub type EntityId = usize;

/// The canonical run identifier.
pub type RunId = String;
