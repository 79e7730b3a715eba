//! End-of-game detection.

use crate::kind::{Kind, KindCounts};

/// The winning kind, if every live entity shares it.
///
/// An empty population has no winner.
pub fn detect(counts: &KindCounts) -> Option<Kind> {
    let population = counts.total();
    if population == 0 {
        return None;
    }
    Kind::ALL.into_iter().find(|kind| counts.get(*kind) == population)
}
