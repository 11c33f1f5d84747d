use crate::action::ActionKind;
use crate::catalog::TemplateId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InstanceId, Phase, PlayerId};

/// Why the rule layer rejected an action. The state is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleViolation {
    #[error("player {actor} acted during the turn of {active}")]
    WrongActivePlayer { actor: PlayerId, active: PlayerId },

    #[error("{action} is not allowed during the {phase} phase")]
    IllegalPhaseForAction { action: ActionKind, phase: Phase },

    #[error("card costs {required} but only {available} resource is available")]
    InsufficientResources { required: u32, available: u32 },

    #[error("card {card} is not in the hand of player {player}")]
    CardNotInHand { player: PlayerId, card: InstanceId },

    #[error("cannot draw {requested} cards from a deck of {available}")]
    DeckExhausted { requested: u32, available: u32 },

    #[error("cannot move from {from} to {to}")]
    IllegalPhaseTransition { from: Phase, to: Phase },

    #[error("the turn cannot end during the {phase} phase")]
    IneligibleEndTurn { phase: Phase },

    #[error("player {player} is not seated")]
    PlayerNotFound { player: PlayerId },

    #[error("draw count must be positive")]
    InvalidDrawCount,

    #[error("card {card} references unknown template '{template}'")]
    TemplateNotFound {
        card: InstanceId,
        template: TemplateId,
    },
}

impl GameError for RuleViolation {
    fn severity(&self) -> ErrorSeverity {
        use RuleViolation::*;
        match self {
            WrongActivePlayer { .. }
            | IllegalPhaseForAction { .. }
            | InsufficientResources { .. }
            | DeckExhausted { .. }
            | IllegalPhaseTransition { .. }
            | IneligibleEndTurn { .. } => ErrorSeverity::Recoverable,
            CardNotInHand { .. }
            | PlayerNotFound { .. }
            | InvalidDrawCount
            | TemplateNotFound { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use RuleViolation::*;
        match self {
            WrongActivePlayer { .. } => "RULE_WRONG_ACTIVE_PLAYER",
            IllegalPhaseForAction { .. } => "RULE_ILLEGAL_PHASE_FOR_ACTION",
            InsufficientResources { .. } => "RULE_INSUFFICIENT_RESOURCES",
            CardNotInHand { .. } => "RULE_CARD_NOT_IN_HAND",
            DeckExhausted { .. } => "RULE_DECK_EXHAUSTED",
            IllegalPhaseTransition { .. } => "RULE_ILLEGAL_PHASE_TRANSITION",
            IneligibleEndTurn { .. } => "RULE_INELIGIBLE_END_TURN",
            PlayerNotFound { .. } => "RULE_PLAYER_NOT_FOUND",
            InvalidDrawCount => "RULE_INVALID_DRAW_COUNT",
            TemplateNotFound { .. } => "RULE_TEMPLATE_NOT_FOUND",
        }
    }
}
