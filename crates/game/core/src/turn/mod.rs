//! Phase and turn state machine.
//!
//! [`TurnManager`] is the only writer of [`TurnState`](crate::state::TurnState).
//! Within a turn the phase moves one step at a time through
//! `Start -> Main -> Reaction -> End`; the wrap back to `Start` happens only
//! through [`TurnManager::advance_turn`].

mod hook;

pub use hook::{BoardTriggerHook, PhaseHook, default_hooks};

use std::sync::Arc;

use crate::effect::EffectResolver;
use crate::state::{BattleState, InvariantViolation, Phase};

/// Drives phase steps and turn handover, running phase hooks on every entry.
#[derive(Clone)]
pub struct TurnManager {
    hooks: Arc<[Arc<dyn PhaseHook>]>,
}

impl std::fmt::Debug for TurnManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.hooks.iter().map(|hook| hook.name()).collect();
        f.debug_struct("TurnManager").field("hooks", &names).finish()
    }
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new(default_hooks())
    }
}

impl TurnManager {
    /// Hooks run in the given order; see [`default_hooks`] for sorting.
    pub fn new(hooks: Arc<[Arc<dyn PhaseHook>]>) -> Self {
        Self { hooks }
    }

    /// Manager without any phase hooks.
    pub fn without_hooks() -> Self {
        Self::new(Arc::from(Vec::<Arc<dyn PhaseHook>>::new()))
    }

    pub fn hooks(&self) -> &[Arc<dyn PhaseHook>] {
        &self.hooks
    }

    /// Moves the current phase exactly one step forward, then runs and drains
    /// the hooks of the entered phase.
    ///
    /// # Errors
    ///
    /// `InvariantViolation::IllegalPhaseStep` if `next` is not the single
    /// forward step from the current phase.
    pub fn advance_phase(
        &self,
        state: &mut BattleState,
        next: Phase,
        resolver: &mut EffectResolver,
    ) -> Result<(), InvariantViolation> {
        let from = state.turn.phase;
        if from.next() != Some(next) {
            return Err(InvariantViolation::IllegalPhaseStep { from, to: next });
        }

        state.turn.phase = next;
        tracing::debug!(turn = state.turn.number, from = %from, to = %next, "phase advanced");
        self.enter_phase(state, next, resolver)
    }

    /// Steps through every remaining phase up to `End`. A no-op in `End`.
    pub fn force_to_end(
        &self,
        state: &mut BattleState,
        resolver: &mut EffectResolver,
    ) -> Result<(), InvariantViolation> {
        while let Some(next) = state.turn.phase.next() {
            self.advance_phase(state, next, resolver)?;
        }
        Ok(())
    }

    /// Ends the current turn: force-advances to `End`, then hands over.
    pub fn end_turn(
        &self,
        state: &mut BattleState,
        resolver: &mut EffectResolver,
    ) -> Result<(), InvariantViolation> {
        self.force_to_end(state, resolver)?;
        self.advance_turn(state, resolver)
    }

    /// Hands control to the next seat and runs its turn start.
    ///
    /// Increments the turn number, wraps the active seat modulo the player
    /// count, resets the phase to `Start` with zero actions, expires temporary
    /// effects, then applies [`Self::resolve_turn_start`] and the `Start`
    /// hooks.
    pub fn advance_turn(
        &self,
        state: &mut BattleState,
        resolver: &mut EffectResolver,
    ) -> Result<(), InvariantViolation> {
        for player in state.players.iter_mut() {
            player.clear_temporary_effects();
        }

        let next = state.opponent_id(state.turn.active)?;
        state.turn.number += 1;
        state.turn.active = next;
        state.turn.phase = Phase::Start;
        state.turn.actions_remaining = 0;
        tracing::debug!(turn = state.turn.number, active = %next, "turn advanced");

        self.resolve_turn_start(state)?;
        self.enter_phase(state, Phase::Start, resolver)
    }

    /// Applies the configured turn-start rules for the active player.
    ///
    /// Grants resource, sets the action allotment, draws cards, then ticks
    /// every status effect of every player by one. The draw is clamped to the
    /// deck size; an exhausted deck skips the draw rather than failing.
    pub fn resolve_turn_start(&self, state: &mut BattleState) -> Result<(), InvariantViolation> {
        let rules = state.context.turn_start();
        let active = state.turn.active;

        let player = state.player_mut(active)?;
        player.resource.gain(rules.resource_gain);
        let drawable = (rules.draw_count as usize).min(player.deck.len());
        for _ in 0..drawable {
            player.draw()?;
        }
        if drawable < rules.draw_count as usize {
            tracing::warn!(
                player = %active,
                requested = rules.draw_count,
                drawable,
                "deck exhausted at turn start"
            );
        }

        state.turn.actions_remaining = rules.actions_per_turn;
        for player in state.players.iter_mut() {
            player.statuses.tick_all();
        }
        Ok(())
    }

    fn enter_phase(
        &self,
        state: &mut BattleState,
        phase: Phase,
        resolver: &mut EffectResolver,
    ) -> Result<(), InvariantViolation> {
        for hook in self.hooks.iter() {
            hook.on_phase_enter(state, phase)?;
        }
        resolver.resolve_pending(state)
    }
}
