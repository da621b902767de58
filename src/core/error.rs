use thiserror::Error;

use crate::core::types::{ColonyId, DwellingId, Nation, NativeUnitId, Tribe, UnitId};

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("Unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Native unit not found: {0}")]
    NativeUnitNotFound(NativeUnitId),

    #[error("Dwelling not found: {0}")]
    DwellingNotFound(DwellingId),

    #[error("Colony not found: {0}")]
    ColonyNotFound(ColonyId),

    #[error("Tribe not found: {0}")]
    TribeNotFound(Tribe),

    #[error("No player for nation: {0}")]
    PlayerNotFound(Nation),

    #[error("Invalid combatant {0}: {1}")]
    InvalidCombatant(String, String),

    #[error("Config error: {0}")]
    Config(#[from] crate::core::config::ConfigLoadError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl CombatError {
    pub fn invalid(who: impl ToString, why: impl Into<String>) -> Self {
        CombatError::InvalidCombatant(who.to_string(), why.into())
    }
}

pub type Result<T> = std::result::Result<T, CombatError>;
