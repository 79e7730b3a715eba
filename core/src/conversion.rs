//! Collision resolution: a caught entity takes its attacker's kind.
//!
//! Entities are never removed. Conversion rewrites `kind` in place,
//! so the population size is constant for the life of a run.

use crate::{
    error::{SimError, SimResult},
    event::SimEvent,
    store::SimStore,
    types::{EntityId, Tick},
};

/// Convert `defeated` to the kind of `attacker`.
///
/// Fails with [`SimError::InvalidConversion`] when the attacker's kind
/// does not hunt the defeated entity's kind.
pub fn resolve(
    store: &mut SimStore,
    tick: Tick,
    attacker: EntityId,
    defeated: EntityId,
) -> SimResult<SimEvent> {
    let attacker_kind = store.entity(attacker)?.kind;
    let defeated_kind = store.entity(defeated)?.kind;

    if attacker_kind.chases() != defeated_kind {
        return Err(SimError::InvalidConversion {
            attacker: attacker_kind,
            defeated: defeated_kind,
        });
    }

    store.set_kind(defeated, attacker_kind)?;

    log::debug!(
        "tick={tick} conversion: #{attacker} ({attacker_kind}) took #{defeated} ({defeated_kind})"
    );

    Ok(SimEvent::EntityConverted {
        tick,
        attacker,
        defeated,
        from: defeated_kind,
        to: attacker_kind,
    })
}
