//! Arena bounds and edge-proximity queries.

use crate::config::SimConfig;
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width:       f64,
    pub height:      f64,
    /// Footprint of one entity. Positions are top-left corners.
    pub entity_size: f64,
    pub edge_buffer: f64,
}

impl Arena {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            width:       config.arena_width,
            height:      config.arena_height,
            entity_size: config.entity_size,
            edge_buffer: config.edge_buffer,
        }
    }

    /// Largest legal position on each axis.
    pub fn max_position(&self) -> DVec2 {
        DVec2::new(
            (self.width - self.entity_size).max(0.0),
            (self.height - self.entity_size).max(0.0),
        )
    }

    pub fn clamp(&self, position: DVec2) -> DVec2 {
        position.clamp(DVec2::ZERO, self.max_position())
    }

    pub fn contains(&self, position: DVec2) -> bool {
        let max = self.max_position();
        (0.0..=max.x).contains(&position.x) && (0.0..=max.y).contains(&position.y)
    }

    /// Direction away from each violated edge: +1 near the low edge,
    /// -1 near the high edge, 0 when the axis is clear.
    pub fn edge_push(&self, position: DVec2) -> DVec2 {
        DVec2::new(
            axis_push(position.x, self.width, self.edge_buffer),
            axis_push(position.y, self.height, self.edge_buffer),
        )
    }

    pub fn is_near_edge(&self, position: DVec2) -> bool {
        self.edge_push(position) != DVec2::ZERO
    }

    /// Strictly more than `edge_buffer` from all four edges.
    pub fn is_interior(&self, position: DVec2) -> bool {
        let b = self.edge_buffer;
        position.x > b
            && position.x < self.width - b
            && position.y > b
            && position.y < self.height - b
    }
}

fn axis_push(coord: f64, extent: f64, buffer: f64) -> f64 {
    if coord < buffer {
        1.0
    } else if coord > extent - buffer {
        -1.0
    } else {
        0.0
    }
}
