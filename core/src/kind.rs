//! The three entity kinds and their cyclic predation relation.
//!
//! Rock chases Scissors, Scissors chases Paper, Paper chases Rock.
//! Every kind has exactly one prey and exactly one predator.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Rock,
    Paper,
    Scissors,
}

impl Kind {
    /// All kinds in creation order. Population is spawned in this order.
    pub const ALL: [Kind; 3] = [Kind::Rock, Kind::Paper, Kind::Scissors];

    /// The kind this kind hunts.
    pub fn chases(self) -> Kind {
        match self {
            Self::Rock     => Self::Scissors,
            Self::Paper    => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }

    /// The kind this kind flees from.
    pub fn runs_from(self) -> Kind {
        match self {
            Self::Rock     => Self::Paper,
            Self::Paper    => Self::Scissors,
            Self::Scissors => Self::Rock,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rock     => "rock",
            Self::Paper    => "paper",
            Self::Scissors => "scissors",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Rock     => "🪨",
            Self::Paper    => "📄",
            Self::Scissors => "✂️",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Live entity tally per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub rock:     usize,
    pub paper:    usize,
    pub scissors: usize,
}

impl KindCounts {
    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Rock     => self.rock,
            Kind::Paper    => self.paper,
            Kind::Scissors => self.scissors,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: Kind) -> &mut usize {
        match kind {
            Kind::Rock     => &mut self.rock,
            Kind::Paper    => &mut self.paper,
            Kind::Scissors => &mut self.scissors,
        }
    }

    pub fn total(&self) -> usize {
        self.rock + self.paper + self.scissors
    }

    /// Kinds that still have at least one member.
    pub fn surviving(&self) -> usize {
        Kind::ALL.iter().filter(|k| self.get(**k) > 0).count()
    }
}
