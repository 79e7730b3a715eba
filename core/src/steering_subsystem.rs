//! Per-entity chase / evade decisions, one pass over the store per tick.
//!
//! Entities are visited in creation order. Each decision reads the latest
//! store state, including moves and conversions made earlier in the same
//! tick.
//!
//! Chase: head for the nearest prey with a small random wander. Close
//! enough means conversion, and the attacker spends the tick converting.
//!
//! Evade (only when no prey of the entity's kind is left):
//!   not escaping ── near an edge ──▶ escaping (fixed heading chosen once)
//!   escaping ────── interior ──────▶ not escaping, flee this same tick
//! Outside of an escape the entity flees straight from its nearest
//! predator. Escape headings never jitter.

use crate::{
    arena::Arena,
    config::SimConfig,
    conversion,
    error::SimResult,
    event::SimEvent,
    kind::Kind,
    neighbor::{self, Neighbor},
    rng::SubsystemRng,
    store::{SimStore, WallEscape},
    subsystem::SimSubsystem,
    types::{EntityId, Tick},
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Running totals since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringStats {
    pub chase_steps:     u64,
    pub evade_steps:     u64,
    pub conversions:     u64,
    pub escapes_started: u64,
    pub escapes_ended:   u64,
    /// Frames where an entity had nowhere to go.
    pub held:            u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteerOutcome {
    Moved { from: DVec2, to: DVec2 },
    Converted { defeated: EntityId },
    Held,
}

pub struct SteeringSubsystem {
    arena:              Arena,
    move_speed:         f64,
    collision_distance: f64,
    jitter_radius:      f64,
    pub stats:          SteeringStats,
}

impl SteeringSubsystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            arena:              Arena::from_config(config),
            move_speed:         config.move_speed,
            collision_distance: config.collision_distance,
            jitter_radius:      config.jitter_radius,
            stats:              SteeringStats::default(),
        }
    }

    /// Decide and apply one entity's action for this tick.
    pub fn steer(
        &mut self,
        tick: Tick,
        store: &mut SimStore,
        id: EntityId,
        rng: &mut SubsystemRng,
        events: &mut Vec<SimEvent>,
    ) -> SimResult<SteerOutcome> {
        let entity = store.entity(id)?;
        let (kind, position) = (entity.kind, entity.position);

        let prey = neighbor::nearest(position, store.candidates(kind.chases()));
        let outcome = match prey {
            Some(prey) => {
                self.stats.chase_steps += 1;
                self.chase(tick, store, id, position, prey, rng, events)?
            }
            None => {
                self.stats.evade_steps += 1;
                self.evade(tick, store, id, kind, position, rng, events)?
            }
        };

        if outcome == SteerOutcome::Held {
            self.stats.held += 1;
        }
        Ok(outcome)
    }

    #[allow(clippy::too_many_arguments)]
    fn chase(
        &mut self,
        tick: Tick,
        store: &mut SimStore,
        id: EntityId,
        position: DVec2,
        prey: Neighbor,
        rng: &mut SubsystemRng,
        events: &mut Vec<SimEvent>,
    ) -> SimResult<SteerOutcome> {
        let jitter = DVec2::new(
            rng.jitter(self.jitter_radius),
            rng.jitter(self.jitter_radius),
        );
        let delta = prey.position - position + jitter;

        if delta.length() < self.collision_distance {
            events.push(conversion::resolve(store, tick, id, prey.id)?);
            self.stats.conversions += 1;
            return Ok(SteerOutcome::Converted { defeated: prey.id });
        }

        self.step(store, id, position, delta)
    }

    #[allow(clippy::too_many_arguments)]
    fn evade(
        &mut self,
        tick: Tick,
        store: &mut SimStore,
        id: EntityId,
        kind: Kind,
        position: DVec2,
        rng: &mut SubsystemRng,
        events: &mut Vec<SimEvent>,
    ) -> SimResult<SteerOutcome> {
        let heading = match store.escape_state(id)? {
            None if self.arena.is_near_edge(position) => {
                let push = self.arena.edge_push(position);
                let escape = WallEscape {
                    direction_x: if push.x != 0.0 { push.x } else { rng.signed_unit() },
                    direction_y: if push.y != 0.0 { push.y } else { rng.signed_unit() },
                };
                store.set_escape_state(id, Some(escape))?;
                self.stats.escapes_started += 1;
                log::debug!(
                    "tick={tick} #{id} ({kind}) escaping edge at ({:.1}, {:.1}) heading ({:.2}, {:.2})",
                    position.x,
                    position.y,
                    escape.direction_x,
                    escape.direction_y
                );
                events.push(SimEvent::WallEscapeStarted {
                    tick,
                    entity: id,
                    direction_x: escape.direction_x,
                    direction_y: escape.direction_y,
                });
                Some(escape.heading())
            }
            None => flee_heading(store, kind, position),
            Some(_) if self.arena.is_interior(position) => {
                store.set_escape_state(id, None)?;
                self.stats.escapes_ended += 1;
                log::debug!("tick={tick} #{id} ({kind}) back in the interior");
                events.push(SimEvent::WallEscapeEnded { tick, entity: id });
                flee_heading(store, kind, position)
            }
            Some(escape) => Some(escape.heading()),
        };

        match heading {
            Some(heading) => self.step(store, id, position, heading),
            None => Ok(SteerOutcome::Held),
        }
    }

    /// Move `move_speed` along `heading`, then clamp to the arena.
    /// A zero heading is no movement.
    fn step(
        &self,
        store: &mut SimStore,
        id: EntityId,
        from: DVec2,
        heading: DVec2,
    ) -> SimResult<SteerOutcome> {
        let Some(direction) = heading.try_normalize() else {
            return Ok(SteerOutcome::Held);
        };
        let to = self.arena.clamp(from + direction * self.move_speed);
        store.set_position(id, to)?;
        log::trace!("#{id} ({:.1}, {:.1}) -> ({:.1}, {:.1})", from.x, from.y, to.x, to.y);
        Ok(SteerOutcome::Moved { from, to })
    }
}

/// Vector from the nearest predator to `position`, if any predator lives.
fn flee_heading(store: &SimStore, kind: Kind, position: DVec2) -> Option<DVec2> {
    neighbor::nearest(position, store.candidates(kind.runs_from()))
        .map(|predator| position - predator.position)
}

impl SimSubsystem for SteeringSubsystem {
    fn name(&self) -> &'static str { "steering" }

    fn update(
        &mut self,
        tick: Tick,
        store: &mut SimStore,
        _events_in: &[SimEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for id in 0..store.len() {
            self.steer(tick, store, id, rng, &mut events)?;
        }
        Ok(events)
    }

    fn reset(&mut self) {
        self.stats = SteeringStats::default();
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
