//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`BattleState`]. Every
//! action runs through the same pipeline, no step skippable:
//!
//! validate → apply → drain effects → post-validate → increment counter
//!
//! A rejected action leaves the state untouched. An invariant violation
//! during mutation leaves the state partially mutated, so the engine poisons
//! itself and refuses further actions; callers continue from a clone taken
//! before the failing call.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use std::sync::Arc;

use crate::action::Action;
use crate::effect::ResolvedEffect;
use crate::error::{ErrorContext, GameError};
use crate::rules::{RuleValidator, RuleViolation};
use crate::state::{BattleState, InvariantViolation, StateDelta};
use crate::turn::{PhaseHook, TurnManager, default_hooks};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// State change metadata (which fields changed).
    pub delta: StateDelta,

    /// Effect references popped while draining, in resolution order.
    pub resolved: Vec<ResolvedEffect>,
}

/// Game engine that owns one battle and applies actions to it.
///
/// The engine is single-threaded and synchronous. Parallel or speculative
/// play works on clones obtained from [`GameEngine::clone_state`].
#[derive(Debug)]
pub struct GameEngine {
    state: BattleState,
    turns: TurnManager,
    poisoned: Option<InvariantViolation>,
}

impl GameEngine {
    /// Creates an engine with the default phase hooks.
    pub fn new(state: BattleState) -> Self {
        Self::with_hooks(state, default_hooks())
    }

    pub fn with_hooks(state: BattleState, hooks: Arc<[Arc<dyn PhaseHook>]>) -> Self {
        Self {
            state,
            turns: TurnManager::new(hooks),
            poisoned: None,
        }
    }

    /// Starts a fresh engine from a snapshot, typically one taken before a
    /// call that poisoned another engine.
    pub fn from_state(snapshot: &BattleState) -> Self {
        Self::new(snapshot.clone())
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Deep copy of the current state for speculative use.
    pub fn clone_state(&self) -> BattleState {
        self.state.clone()
    }

    pub fn into_state(self) -> BattleState {
        self.state
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn poison_cause(&self) -> Option<&InvariantViolation> {
        self.poisoned.as_ref()
    }

    /// Runs the rule checks for `action` without mutating anything.
    pub fn validate(&self, action: &Action) -> Result<(), RuleViolation> {
        RuleValidator::validate(&self.state, action)
    }

    /// Applies one action through the full pipeline.
    ///
    /// Returns an [`ExecutionOutcome`] with the state delta and the effects
    /// resolved while draining.
    ///
    /// # Errors
    ///
    /// - `ExecuteError::Rejected` if validation fails; the state is unchanged
    /// - `ExecuteError::Invariant` if mutation breaks an invariant; the
    ///   engine is poisoned
    /// - `ExecuteError::Poisoned` on any call after that
    pub fn apply_action(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        let kind = action.kind();
        let context = ErrorContext::new(self.state.action_counter()).with_player(action.actor());

        if let Some(cause) = &self.poisoned {
            return Err(ExecuteError::Poisoned {
                cause: cause.clone(),
                context,
            });
        }

        if let Err(violation) = self.validate(action) {
            tracing::warn!(
                action = action.as_snake_case(),
                actor = %action.actor(),
                code = violation.error_code(),
                "action rejected: {violation}"
            );
            return Err(ExecuteError::Rejected {
                kind,
                violation,
                context,
            });
        }

        let before = self.state.clone();

        let resolved = match transition::execute_transition(action, &mut self.state, &self.turns) {
            Ok(resolved) => resolved,
            Err(error) => {
                tracing::error!(
                    action = action.as_snake_case(),
                    actor = %action.actor(),
                    phase = error.phase.as_str(),
                    code = error.error.error_code(),
                    "invariant violated, engine poisoned: {}",
                    error.error
                );
                self.poisoned = Some(error.error.clone());
                return Err(ExecuteError::Invariant {
                    kind,
                    error,
                    context: context.with_message("state partially mutated"),
                });
            }
        };

        self.state.increment_action_counter();

        let delta = StateDelta::from_states(action.clone(), &before, &self.state);
        tracing::debug!(
            action = action.as_snake_case(),
            actor = %action.actor(),
            index = delta.action_index,
            resolved = resolved.len(),
            rng_draws = delta.rng_draws,
            "action applied"
        );

        Ok(ExecutionOutcome { delta, resolved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardTemplate;
    use crate::state::{Phase, PlayerId};

    fn engine() -> GameEngine {
        let deck: Vec<_> = (0..4)
            .map(|i| CardTemplate::new(format!("c{i}").as_str(), 0))
            .collect();
        GameEngine::new(BattleState::build_initial(&deck, &deck, 3).unwrap())
    }

    #[test]
    fn rejected_action_leaves_state_and_counter_untouched() {
        let mut engine = engine();
        let before = engine.clone_state();

        let error = engine
            .apply_action(&Action::play_card(PlayerId::FIRST, crate::state::InstanceId(0)))
            .unwrap_err();

        assert!(matches!(
            error.violation(),
            Some(RuleViolation::IllegalPhaseForAction { .. })
        ));
        assert!(error.severity().is_recoverable());
        assert_eq!(error.context().map(|c| c.action_counter), Some(0));
        assert_eq!(engine.state(), &before);
        assert!(!engine.is_poisoned());
    }

    #[test]
    fn applied_action_reports_delta() {
        let mut engine = engine();

        let outcome = engine
            .apply_action(&Action::draw_card(PlayerId::FIRST, 2))
            .unwrap();

        assert_eq!(outcome.delta.action_index, 1);
        assert!(outcome.delta.turn.is_empty());
        assert!(outcome.resolved.is_empty());
        assert_eq!(engine.state().action_counter(), 1);
        assert_eq!(engine.state().player(PlayerId::FIRST).unwrap().hand.len(), 2);

        engine
            .apply_action(&Action::advance_phase(PlayerId::FIRST, Phase::Main))
            .unwrap();
        assert_eq!(engine.state().phase(), Phase::Main);
    }
}
