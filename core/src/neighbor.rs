//! Nearest-neighbour query over a candidate set.

use crate::types::EntityId;
use glam::DVec2;

/// The closest candidate found by [`nearest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id:       EntityId,
    pub position: DVec2,
    pub distance: f64,
}

/// Returns the candidate closest to `origin`, or `None` for an empty set.
///
/// Ties keep the first candidate encountered, so the result is stable for
/// a given enumeration order.
pub fn nearest<I>(origin: DVec2, candidates: I) -> Option<Neighbor>
where
    I: IntoIterator<Item = (EntityId, DVec2)>,
{
    let mut best: Option<(EntityId, DVec2, f64)> = None;
    for (id, position) in candidates {
        let dist_sq = origin.distance_squared(position);
        if best.map_or(true, |(_, _, d)| dist_sq < d) {
            best = Some((id, position, dist_sq));
        }
    }
    best.map(|(id, position, dist_sq)| Neighbor {
        id,
        position,
        distance: dist_sq.sqrt(),
    })
}
