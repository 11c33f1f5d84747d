use crate::action::{ActionContext, ActionTransition};
use crate::state::{BattleState, InvariantViolation, PlayerId};

/// Finishes the active player's turn and hands control to the next seat.
///
/// Any phases not yet visited are stepped through first, so their hooks fire
/// in order before the turn advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction {
    pub player: PlayerId,

    /// Set when the integrating layer ends the turn on the player's behalf
    /// (turn timer expiry). Forced ends are legal from any phase.
    pub forced: bool,
}

impl EndTurnAction {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            forced: false,
        }
    }

    pub fn forced(player: PlayerId) -> Self {
        Self {
            player,
            forced: true,
        }
    }
}

impl ActionTransition for EndTurnAction {
    fn actor(&self) -> PlayerId {
        self.player
    }

    fn apply(
        &self,
        state: &mut BattleState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), InvariantViolation> {
        ctx.turns.end_turn(state, ctx.resolver)
    }
}
