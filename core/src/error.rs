use crate::{kind::Kind, types::EntityId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Entity {id} not found")]
    EntityNotFound { id: EntityId },

    #[error("Invalid conversion: {attacker} does not chase {defeated}")]
    InvalidConversion { attacker: Kind, defeated: Kind },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
