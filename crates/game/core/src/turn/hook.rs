//! Phase-entry hooks.
//!
//! The turn manager calls every registered [`PhaseHook`] each time a phase is
//! entered, in priority order. Hooks push effect references; the turn manager
//! drains them before moving on, so a phase's triggers have fully resolved by
//! the time the next phase starts.

use std::sync::Arc;

use crate::state::{BattleState, EffectReference, InvariantViolation, Phase};

/// A hook invoked when the active turn enters a phase.
///
/// Hooks are executed in priority order (lower priority values execute first).
pub trait PhaseHook: Send + Sync {
    /// Returns the priority of this hook. Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn on_phase_enter(
        &self,
        state: &mut BattleState,
        phase: Phase,
    ) -> Result<(), InvariantViolation>;
}

/// Queues authored phase triggers of the active player's board.
///
/// For every card on the active player's board, each template trigger whose
/// phase matches is pushed in authored order. Entering `End` additionally
/// pushes the card's temporary effects, which expire when the turn advances.
#[derive(Debug)]
pub struct BoardTriggerHook;

impl PhaseHook for BoardTriggerHook {
    fn name(&self) -> &'static str {
        "board_trigger"
    }

    fn on_phase_enter(
        &self,
        state: &mut BattleState,
        phase: Phase,
    ) -> Result<(), InvariantViolation> {
        let catalog = state.context.catalog_handle();
        let active = state.active_player();

        let mut queued = Vec::new();
        for card in state.player(active)?.board.iter() {
            let template = catalog.template(&card.template)?;
            queued.extend(
                template
                    .triggers
                    .iter()
                    .filter(|trigger| trigger.phase == phase)
                    .map(|trigger| EffectReference::new(active, card.id, trigger.effect.clone())),
            );
            if phase == Phase::End {
                queued.extend(
                    card.temporary_effects()
                        .iter()
                        .map(|effect| EffectReference::new(active, card.id, effect.clone())),
                );
            }
        }

        for reference in queued {
            state.effect_stack.push(reference);
        }
        Ok(())
    }
}

/// Returns the default set of hooks, sorted by priority.
pub fn default_hooks() -> Arc<[Arc<dyn PhaseHook>]> {
    let mut hooks: Vec<Arc<dyn PhaseHook>> = vec![Arc::new(BoardTriggerHook)];

    hooks.sort_by_key(|h| h.priority());

    hooks.into()
}
