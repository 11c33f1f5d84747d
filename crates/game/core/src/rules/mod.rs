//! Pure legality checks, run before any mutation.
//!
//! [`RuleValidator`] only reads the state, so it can be called speculatively
//! (for move generation or UI hints) without cloning anything.

mod error;

pub use error::RuleViolation;

use crate::action::{
    Action, ActionKind, AdvancePhaseAction, DrawCardAction, EndTurnAction, PlayCardAction,
};
use crate::state::{BattleState, PlayerId, PlayerState};

/// Stateless precondition layer for every [`Action`] variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleValidator;

impl RuleValidator {
    /// Decides whether `action` is legal against `state`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found. Checks run in the order
    /// seat, active player, phase, then action-specific preconditions.
    pub fn validate(state: &BattleState, action: &Action) -> Result<(), RuleViolation> {
        match action {
            Action::DrawCard(draw) => Self::check_draw(state, draw),
            Action::PlayCard(play) => Self::check_play(state, play),
            Action::AdvancePhase(advance) => Self::check_advance(state, advance),
            Action::EndTurn(end) => Self::check_end_turn(state, end),
        }
    }

    fn active_seat(state: &BattleState, actor: PlayerId) -> Result<&PlayerState, RuleViolation> {
        let player = state
            .player(actor)
            .map_err(|_| RuleViolation::PlayerNotFound { player: actor })?;
        let active = state.active_player();
        if actor != active {
            return Err(RuleViolation::WrongActivePlayer { actor, active });
        }
        Ok(player)
    }

    fn check_draw(state: &BattleState, draw: &DrawCardAction) -> Result<(), RuleViolation> {
        let player = Self::active_seat(state, draw.player)?;

        let phase = state.phase();
        if !phase.allows_draw() {
            return Err(RuleViolation::IllegalPhaseForAction {
                action: ActionKind::DrawCard,
                phase,
            });
        }
        if draw.count == 0 {
            return Err(RuleViolation::InvalidDrawCount);
        }

        let available = player.deck.len();
        if available < draw.count as usize {
            return Err(RuleViolation::DeckExhausted {
                requested: draw.count,
                available: available as u32,
            });
        }
        Ok(())
    }

    fn check_play(state: &BattleState, play: &PlayCardAction) -> Result<(), RuleViolation> {
        let player = Self::active_seat(state, play.player)?;

        let phase = state.phase();
        if !phase.allows_play() {
            return Err(RuleViolation::IllegalPhaseForAction {
                action: ActionKind::PlayCard,
                phase,
            });
        }

        let card = player
            .hand
            .get(play.card)
            .ok_or(RuleViolation::CardNotInHand {
                player: play.player,
                card: play.card,
            })?;
        let template =
            state
                .catalog()
                .template(&card.template)
                .map_err(|_| RuleViolation::TemplateNotFound {
                    card: card.id,
                    template: card.template.clone(),
                })?;

        let available = player.resource.current();
        if !player.resource.can_spend(template.cost) {
            return Err(RuleViolation::InsufficientResources {
                required: template.cost,
                available,
            });
        }
        Ok(())
    }

    fn check_advance(
        state: &BattleState,
        advance: &AdvancePhaseAction,
    ) -> Result<(), RuleViolation> {
        Self::active_seat(state, advance.player)?;

        let from = state.phase();
        if from.next() != Some(advance.next) {
            return Err(RuleViolation::IllegalPhaseTransition {
                from,
                to: advance.next,
            });
        }
        Ok(())
    }

    fn check_end_turn(state: &BattleState, end: &EndTurnAction) -> Result<(), RuleViolation> {
        Self::active_seat(state, end.player)?;

        let phase = state.phase();
        if !end.forced && !phase.allows_end_turn() {
            return Err(RuleViolation::IneligibleEndTurn { phase });
        }
        Ok(())
    }
}
