//! State management errors.
//!
//! [`StateError`] is what individual state operations report. When one of
//! those failures happens while an action is already mutating the state it is
//! promoted to an [`InvariantViolation`]: the rule layer was supposed to make
//! it impossible.

use crate::catalog::{CatalogError, TemplateId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InstanceId, Phase, PlayerId};

/// Errors reported by state operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("player {player} not found")]
    PlayerNotFound { player: PlayerId },

    #[error("card {instance} not found")]
    CardNotFound { instance: InstanceId },

    #[error("deck of player {player} is empty")]
    EmptyDeck { player: PlayerId },

    #[error("insufficient resource (required: {required}, available: {available})")]
    InsufficientResource { required: u32, available: u32 },

    #[error("status effect list of player {player} is full")]
    StatusCapacity { player: PlayerId },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            PlayerNotFound { .. } | CardNotFound { .. } => ErrorSeverity::Validation,
            EmptyDeck { .. } | InsufficientResource { .. } => ErrorSeverity::Recoverable,
            StatusCapacity { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            PlayerNotFound { .. } => "STATE_PLAYER_NOT_FOUND",
            CardNotFound { .. } => "STATE_CARD_NOT_FOUND",
            EmptyDeck { .. } => "STATE_EMPTY_DECK",
            InsufficientResource { .. } => "STATE_INSUFFICIENT_RESOURCE",
            StatusCapacity { .. } => "STATE_STATUS_CAPACITY",
        }
    }
}

/// A precondition the rule layer guarantees was violated during mutation.
///
/// The state that produced one of these may be partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("drew from the empty deck of player {player}")]
    EmptyDeck { player: PlayerId },

    #[error("popped an empty effect stack")]
    EmptyEffectStack,

    #[error("card {instance} missing from the expected zone")]
    CardMissing { instance: InstanceId },

    #[error("player {player} missing from state")]
    PlayerMissing { player: PlayerId },

    #[error("spent {required} resource with only {available} available")]
    InsufficientResource { required: u32, available: u32 },

    #[error("template '{template}' missing from catalog")]
    TemplateMissing { template: TemplateId },

    #[error("catalog lookup failed during resolution: {0}")]
    Catalog(CatalogError),

    #[error("illegal phase step {from} -> {to}")]
    IllegalPhaseStep { from: Phase, to: Phase },

    #[error("card {instance} appears in more than one zone")]
    ZoneConflict { instance: InstanceId },

    #[error("status effect list of player {player} overflowed")]
    StatusCapacity { player: PlayerId },

    #[error("effect resolution exceeded {limit} pops in one action")]
    ResolutionLimitExceeded { limit: u32 },
}

impl From<StateError> for InvariantViolation {
    fn from(error: StateError) -> Self {
        match error {
            StateError::PlayerNotFound { player } => Self::PlayerMissing { player },
            StateError::CardNotFound { instance } => Self::CardMissing { instance },
            StateError::EmptyDeck { player } => Self::EmptyDeck { player },
            StateError::InsufficientResource {
                required,
                available,
            } => Self::InsufficientResource {
                required,
                available,
            },
            StateError::StatusCapacity { player } => Self::StatusCapacity { player },
        }
    }
}

impl From<CatalogError> for InvariantViolation {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::TemplateNotFound(template) => Self::TemplateMissing { template },
            other => Self::Catalog(other),
        }
    }
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            EmptyDeck { .. } => "INVARIANT_EMPTY_DECK",
            EmptyEffectStack => "INVARIANT_EMPTY_EFFECT_STACK",
            CardMissing { .. } => "INVARIANT_CARD_MISSING",
            PlayerMissing { .. } => "INVARIANT_PLAYER_MISSING",
            InsufficientResource { .. } => "INVARIANT_INSUFFICIENT_RESOURCE",
            TemplateMissing { .. } => "INVARIANT_TEMPLATE_MISSING",
            Catalog(_) => "INVARIANT_CATALOG",
            IllegalPhaseStep { .. } => "INVARIANT_ILLEGAL_PHASE_STEP",
            ZoneConflict { .. } => "INVARIANT_ZONE_CONFLICT",
            StatusCapacity { .. } => "INVARIANT_STATUS_CAPACITY",
            ResolutionLimitExceeded { .. } => "INVARIANT_RESOLUTION_LIMIT",
        }
    }
}
