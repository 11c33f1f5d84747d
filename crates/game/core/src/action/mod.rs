//! Player actions, the only mutation entry points of a battle.
//!
//! [`Action`] is a closed set of four commands. Each wraps a concrete
//! transition type implementing [`ActionTransition`]; the engine routes every
//! variant through one exhaustive match, so adding a new kind is a
//! compile-time exhaustiveness change.
//!
//! Legality is decided up front by [`crate::rules::RuleValidator`]. Transitions
//! assume a validated action and report anything that still goes wrong as an
//! [`InvariantViolation`].

mod draw;
mod end_turn;
mod phase;
mod play;
mod root;

pub use draw::DrawCardAction;
pub use end_turn::EndTurnAction;
pub use phase::AdvancePhaseAction;
pub use play::PlayCardAction;
#[cfg(feature = "serde")]
pub use root::compute_actions_root;

use crate::effect::EffectResolver;
use crate::state::{BattleState, InstanceId, InvariantViolation, Phase, PlayerId};
use crate::turn::TurnManager;

/// Collaborators a transition may call into while mutating the state.
pub struct ActionContext<'a> {
    pub turns: &'a TurnManager,
    pub resolver: &'a mut EffectResolver,
}

/// Defines how a concrete action variant mutates battle state.
pub trait ActionTransition {
    /// Returns the seat performing this action.
    fn actor(&self) -> PlayerId;

    /// Applies the action by mutating the state directly. Implementations may
    /// assume the rule validator accepted the action.
    fn apply(
        &self,
        state: &mut BattleState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), InvariantViolation>;

    /// Validates post-conditions using the state **after** mutation and
    /// effect drainage.
    fn post_validate(&self, _state: &BattleState) -> Result<(), InvariantViolation> {
        Ok(())
    }
}

/// Discriminant of [`Action`], used in logs and error reports.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    DrawCard,
    PlayCard,
    AdvancePhase,
    EndTurn,
}

/// Top-level action enum.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    DrawCard(DrawCardAction),
    PlayCard(PlayCardAction),
    AdvancePhase(AdvancePhaseAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn draw_card(player: PlayerId, count: u32) -> Self {
        Self::DrawCard(DrawCardAction::new(player, count))
    }

    pub fn play_card(player: PlayerId, card: InstanceId) -> Self {
        Self::PlayCard(PlayCardAction::new(player, card))
    }

    pub fn advance_phase(player: PlayerId, next: Phase) -> Self {
        Self::AdvancePhase(AdvancePhaseAction::new(player, next))
    }

    pub fn end_turn(player: PlayerId) -> Self {
        Self::EndTurn(EndTurnAction::new(player))
    }

    /// End of turn issued by the integrating layer (turn timer expiry). Skips
    /// the Reaction/End eligibility check.
    pub fn force_end_turn(player: PlayerId) -> Self {
        Self::EndTurn(EndTurnAction::forced(player))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::DrawCard(_) => ActionKind::DrawCard,
            Action::PlayCard(_) => ActionKind::PlayCard,
            Action::AdvancePhase(_) => ActionKind::AdvancePhase,
            Action::EndTurn(_) => ActionKind::EndTurn,
        }
    }

    /// Returns the seat performing this action.
    pub fn actor(&self) -> PlayerId {
        match self {
            Action::DrawCard(action) => action.actor(),
            Action::PlayCard(action) => action.actor(),
            Action::AdvancePhase(action) => action.actor(),
            Action::EndTurn(action) => action.actor(),
        }
    }

    /// Returns the snake_case string representation of the action.
    ///
    /// Used for logging and serialization keys.
    pub fn as_snake_case(&self) -> &'static str {
        match self.kind() {
            ActionKind::DrawCard => "draw_card",
            ActionKind::PlayCard => "play_card",
            ActionKind::AdvancePhase => "advance_phase",
            ActionKind::EndTurn => "end_turn",
        }
    }
}

impl From<DrawCardAction> for Action {
    fn from(action: DrawCardAction) -> Self {
        Self::DrawCard(action)
    }
}

impl From<PlayCardAction> for Action {
    fn from(action: PlayCardAction) -> Self {
        Self::PlayCard(action)
    }
}

impl From<AdvancePhaseAction> for Action {
    fn from(action: AdvancePhaseAction) -> Self {
        Self::AdvancePhase(action)
    }
}

impl From<EndTurnAction> for Action {
    fn from(action: EndTurnAction) -> Self {
        Self::EndTurn(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_report_kind_and_actor() {
        let actions = [
            Action::draw_card(PlayerId::FIRST, 2),
            Action::play_card(PlayerId::SECOND, InstanceId(3)),
            Action::advance_phase(PlayerId::FIRST, Phase::Main),
            Action::force_end_turn(PlayerId::SECOND),
        ];

        let kinds: Vec<_> = actions.iter().map(Action::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::DrawCard,
                ActionKind::PlayCard,
                ActionKind::AdvancePhase,
                ActionKind::EndTurn
            ]
        );
        assert_eq!(actions[1].actor(), PlayerId::SECOND);
        for action in &actions {
            assert_eq!(action.as_snake_case(), action.kind().to_string());
        }
    }
}
