use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Tunables for a single arena session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub population_per_kind: usize,
    /// Distance travelled per frame.
    pub move_speed:          f64,
    /// Jittered distance below which a chaser converts its prey.
    pub collision_distance:  f64,
    /// Distance from an edge at which evasion switches to wall escape.
    pub edge_buffer:         f64,
    /// Width of the uniform wander added to chase deltas.
    pub jitter_radius:       f64,
    pub entity_size:         f64,
    pub arena_width:         f64,
    pub arena_height:        f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_per_kind: 10,
            move_speed:          2.0,
            collision_distance:  30.0,
            edge_buffer:         50.0,
            jitter_radius:       10.0,
            entity_size:         30.0,
            arena_width:         800.0,
            arena_height:        600.0,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// 500×500 arena, one entity per kind, default movement tunables.
    pub fn default_test() -> Self {
        Self {
            population_per_kind: 1,
            arena_width: 500.0,
            arena_height: 500.0,
            ..Self::default()
        }
    }

    pub fn population(&self) -> usize {
        self.population_per_kind * crate::kind::Kind::ALL.len()
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.population_per_kind == 0 {
            return Err(invalid("population_per_kind", "must be at least 1"));
        }
        positive("move_speed", self.move_speed)?;
        positive("collision_distance", self.collision_distance)?;
        positive("entity_size", self.entity_size)?;
        non_negative("edge_buffer", self.edge_buffer)?;
        non_negative("jitter_radius", self.jitter_radius)?;

        for (field, extent) in [("arena_width", self.arena_width), ("arena_height", self.arena_height)] {
            positive(field, extent)?;
            // The interior must be reachable from inside the clamped region,
            // otherwise a wall escape could never end.
            if self.edge_buffer * 2.0 >= extent || self.edge_buffer >= extent - self.entity_size {
                return Err(invalid(
                    field,
                    format!(
                        "{extent} leaves no interior for edge_buffer {} and entity_size {}",
                        self.edge_buffer, self.entity_size
                    ),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> SimError {
    SimError::InvalidConfig { field, reason: reason.into() }
}

fn positive(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative and finite, got {value}")))
    }
}
