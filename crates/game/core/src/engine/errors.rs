//! Error types for the action execution pipeline.

use crate::action::ActionKind;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::rules::RuleViolation;
use crate::state::InvariantViolation;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    Apply,
    Drain,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::Apply => "apply",
            TransitionPhase::Drain => "drain",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
///
/// `Rejected` is tier one: nothing was mutated and the caller may try another
/// action. `Invariant` and `Poisoned` are tier two: the engine must be
/// discarded and play resumed from an earlier clone.
///
/// Serialize-only: the context message is a static string, so reports can be
/// written out but not read back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExecuteError {
    #[error("{kind} rejected: {violation}")]
    Rejected {
        kind: ActionKind,
        violation: RuleViolation,
        context: ErrorContext,
    },

    #[error("{kind} aborted: {error}")]
    Invariant {
        kind: ActionKind,
        error: TransitionPhaseError<InvariantViolation>,
        context: ErrorContext,
    },

    #[error("engine is unusable after an earlier invariant violation: {cause}")]
    Poisoned {
        cause: InvariantViolation,
        context: ErrorContext,
    },
}

impl ExecuteError {
    /// Returns the rule violation if the action was rejected before mutation.
    pub fn violation(&self) -> Option<&RuleViolation> {
        match self {
            Self::Rejected { violation, .. } => Some(violation),
            _ => None,
        }
    }

    /// Returns the invariant violation behind a fatal error.
    pub fn invariant(&self) -> Option<&InvariantViolation> {
        match self {
            Self::Rejected { .. } => None,
            Self::Invariant { error, .. } => Some(&error.error),
            Self::Poisoned { cause, .. } => Some(cause),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected { violation, .. } => violation.severity(),
            Self::Invariant { .. } | Self::Poisoned { .. } => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Rejected { context, .. }
            | Self::Invariant { context, .. }
            | Self::Poisoned { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { violation, .. } => violation.error_code(),
            Self::Invariant { error, .. } => error.error.error_code(),
            Self::Poisoned { .. } => "ENGINE_POISONED",
        }
    }
}
