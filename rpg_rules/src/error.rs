//! Error types for world model operations.
//!
//! Every failure leaves the world untouched. Callers that only care about the broad
//! outcome can classify an error with [`RulesError::kind`].

use thiserror::Error;

use crate::entities::{AbilityId, EntityId, RoomId};

/// Broad classification of a [`RulesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced character, room, or ability does not exist.
    NotFound,
    /// The request was understood but is not allowed (or not recognized).
    InvalidOperation,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::InvalidOperation => "invalid operation",
        }
    }
}

/// Errors raised by world model and combat operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Character not found: {0}")]
    CharacterNotFound(EntityId),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("Ability not found: {0}")]
    AbilityNotFound(AbilityId),

    /// The acting character does not hold the ability it tried to use.
    #[error("{character} does not have the ability {ability}")]
    AbilityNotHeld { character: String, ability: String },

    /// The filter attribute is not one the query engine understands.
    #[error("Unknown filter criterion: {0}")]
    UnknownCriterion(String),

    /// The filter attribute is known but its value could not be parsed.
    #[error("Invalid value {value:?} for criterion {criterion}")]
    InvalidCriterionValue { criterion: String, value: String },

    #[error("Unknown ability type: {0}")]
    UnknownAbilityType(String),

    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}

impl RulesError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CharacterNotFound(_) | Self::RoomNotFound(_) | Self::AbilityNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AbilityNotHeld { .. }
            | Self::UnknownCriterion(_)
            | Self::InvalidCriterionValue { .. }
            | Self::UnknownAbilityType(_)
            | Self::UnknownDirection(_) => ErrorKind::InvalidOperation,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_invalid_operation(&self) -> bool {
        self.kind() == ErrorKind::InvalidOperation
    }
}

/// Result alias for world model operations.
pub type Result<T> = std::result::Result<T, RulesError>;
