//! Errors raised by the rules components

use crate::action::ActionType;
use crate::types::Ability;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised while resolving an action or looking up rules data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("Invalid participant: {0} is missing")]
    InvalidParticipant(&'static str),
    #[error("Unknown action type: {0}")]
    UnknownActionType(String),
    #[error("Unknown rank: {0}")]
    UnknownRank(String),
    #[error("{actor} has no {ability} score")]
    UnknownAbility { actor: String, ability: Ability },
    #[error("Cannot spend {requested} karma, only {available} available")]
    InsufficientKarma { requested: u32, available: u32 },
    #[error("No rank covers value {0}")]
    ValueOutOfRange(u32),
    #[error("No catalog entry for action {0}")]
    MissingActionDefinition(ActionType),
}

impl CombatError {
    /// Classify the error for outcome reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            CombatError::InvalidParticipant(_) => ErrorKind::InvalidParticipant,
            CombatError::UnknownActionType(_) => ErrorKind::UnknownActionType,
            CombatError::UnknownRank(_) => ErrorKind::UnknownRank,
            CombatError::UnknownAbility { .. } => ErrorKind::UnknownAbility,
            CombatError::InsufficientKarma { .. } => ErrorKind::InsufficientKarma,
            CombatError::ValueOutOfRange(_) => ErrorKind::ValueOutOfRange,
            CombatError::MissingActionDefinition(_) => ErrorKind::MissingActionDefinition,
        }
    }

    /// Whether the error points at misconfigured tables rather than bad input
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CombatError::UnknownRank(_)
                | CombatError::ValueOutOfRange(_)
                | CombatError::MissingActionDefinition(_)
        )
    }
}

/// Serializable error tag carried by failed outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidParticipant,
    UnknownActionType,
    UnknownRank,
    UnknownAbility,
    InsufficientKarma,
    ValueOutOfRange,
    MissingActionDefinition,
}
