//! In-memory entity store.
//!
//! RULE: Only store.rs mutates entities.
//! Subsystems call store methods — they never hold an entity across
//! frames, only its id. The per-kind count index is updated on every
//! kind change so termination never has to rescan the population.

use crate::{
    arena::Arena,
    error::{SimError, SimResult},
    kind::{Kind, KindCounts},
    rng::SubsystemRng,
    types::EntityId,
};
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Fixed heading chosen when a fleeing entity first enters the edge buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallEscape {
    pub direction_x: f64,
    pub direction_y: f64,
}

impl WallEscape {
    pub fn heading(&self) -> DVec2 {
        DVec2::new(self.direction_x, self.direction_y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id:       EntityId,
    pub kind:     Kind,
    pub position: DVec2,
    /// Present only while the entity is escaping an arena edge.
    pub escape:   Option<WallEscape>,
}

#[derive(Debug, Clone, Default)]
pub struct SimStore {
    entities: Vec<Entity>,
    counts:   KindCounts,
}

impl SimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `per_kind` entities of every kind at uniform random positions,
    /// kind by kind in [`Kind::ALL`] order.
    pub fn populate(&mut self, per_kind: usize, arena: &Arena, rng: &mut SubsystemRng) {
        let max = arena.max_position();
        for kind in Kind::ALL {
            for _ in 0..per_kind {
                let position = DVec2::new(rng.range_f64(0.0, max.x), rng.range_f64(0.0, max.y));
                self.spawn(kind, position);
            }
        }
    }

    pub fn spawn(&mut self, kind: Kind, position: DVec2) -> EntityId {
        let id = self.entities.len();
        self.entities.push(Entity { id, kind, position, escape: None });
        *self.counts.get_mut(kind) += 1;
        id
    }

    /// Drop every entity along with any escape state.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.counts = KindCounts::default();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, id: EntityId) -> SimResult<&Entity> {
        self.entities.get(id).ok_or(SimError::EntityNotFound { id })
    }

    fn entity_mut(&mut self, id: EntityId) -> SimResult<&mut Entity> {
        self.entities.get_mut(id).ok_or(SimError::EntityNotFound { id })
    }

    /// All entities in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// `(id, position)` of every entity of `kind`, in creation order.
    pub fn candidates(&self, kind: Kind) -> impl Iterator<Item = (EntityId, DVec2)> + '_ {
        self.entities
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| (e.id, e.position))
    }

    pub fn counts(&self) -> KindCounts {
        self.counts
    }

    pub fn set_position(&mut self, id: EntityId, position: DVec2) -> SimResult<()> {
        self.entity_mut(id)?.position = position;
        Ok(())
    }

    /// Overwrite an entity's kind. Returns the previous kind.
    /// Any escape state belonged to the old kind's evasion and is dropped.
    pub fn set_kind(&mut self, id: EntityId, kind: Kind) -> SimResult<Kind> {
        let entity = self.entity_mut(id)?;
        let previous = entity.kind;
        if previous == kind {
            return Ok(previous);
        }
        entity.kind = kind;
        entity.escape = None;
        *self.counts.get_mut(previous) -= 1;
        *self.counts.get_mut(kind) += 1;
        Ok(previous)
    }

    pub fn escape_state(&self, id: EntityId) -> SimResult<Option<WallEscape>> {
        Ok(self.entity(id)?.escape)
    }

    pub fn set_escape_state(&mut self, id: EntityId, escape: Option<WallEscape>) -> SimResult<()> {
        self.entity_mut(id)?.escape = escape;
        Ok(())
    }
}
