//! Common error infrastructure for battle-core.
//!
//! Errors come in two tiers. Rule violations ([`crate::rules::RuleViolation`])
//! are raised before any mutation and leave the state untouched. Invariant
//! violations ([`crate::state::InvariantViolation`]) are raised while an action
//! is mutating the state and poison the engine that observed them.
//!
//! Every error type implements [`GameError`] so callers can classify failures
//! without matching on concrete variants.

use crate::state::PlayerId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action was legal in shape but not right now (wrong phase, not enough resource)
/// - **Validation**: the action references something that does not exist
/// - **Internal**: rule layer and mutation layer disagree; indicates a bug
/// - **Fatal**: the state may be partially mutated and must not be used further
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the caller may retry with a different action.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates the engine can no longer be trusted.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information captured where an error is created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Seat involved in the failure, if any.
    pub player: Option<PlayerId>,

    /// Number of actions fully applied before the failure.
    ///
    /// Correlates a failure with a position in the replay log.
    pub action_counter: u64,

    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(action_counter: u64) -> Self {
        Self {
            player: None,
            action_counter,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all battle-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier for the error variant, suitable for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
