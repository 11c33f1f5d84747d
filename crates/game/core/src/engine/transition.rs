//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionContext, ActionTransition};
use crate::effect::{EffectResolver, ResolvedEffect};
use crate::state::{BattleState, InvariantViolation};
use crate::turn::TurnManager;

use super::errors::{TransitionPhase, TransitionPhaseError};

type TransitionResult = Result<(), TransitionPhaseError<InvariantViolation>>;

/// Executes a validated transition through its mutation phases.
///
/// Phases:
/// 1. `apply` - Mutate the state
/// 2. `drain` - Resolve every effect the mutation queued
/// 3. `post_validate` - Action postconditions, then zone exclusivity
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut BattleState,
    ctx: &mut ActionContext<'_>,
) -> TransitionResult
where
    T: ActionTransition,
{
    transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    ctx.resolver
        .resolve_pending(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Drain, error))?;

    transition
        .post_validate(state)
        .and_then(|()| state.check_zone_exclusivity())
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes an action to its transition and returns the effects it resolved.
///
/// This is the internal implementation used by `GameEngine::apply_action`.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut BattleState,
    turns: &TurnManager,
) -> Result<Vec<ResolvedEffect>, TransitionPhaseError<InvariantViolation>> {
    let mut resolver = EffectResolver::for_state(state);
    let mut ctx = ActionContext {
        turns,
        resolver: &mut resolver,
    };

    match action {
        Action::DrawCard(transition) => drive_transition(transition, state, &mut ctx),
        Action::PlayCard(transition) => drive_transition(transition, state, &mut ctx),
        Action::AdvancePhase(transition) => drive_transition(transition, state, &mut ctx),
        Action::EndTurn(transition) => drive_transition(transition, state, &mut ctx),
    }?;

    Ok(resolver.into_resolved())
}
