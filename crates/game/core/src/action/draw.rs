use crate::action::{ActionContext, ActionTransition};
use crate::state::{BattleState, InvariantViolation, PlayerId};

/// Moves `count` cards from the top of the actor's deck into their hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawCardAction {
    pub player: PlayerId,
    pub count: u32,
}

impl DrawCardAction {
    pub fn new(player: PlayerId, count: u32) -> Self {
        Self { player, count }
    }
}

impl ActionTransition for DrawCardAction {
    fn actor(&self) -> PlayerId {
        self.player
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), InvariantViolation> {
        let player = state.player_mut(self.player)?;
        for _ in 0..self.count {
            player.draw()?;
        }
        Ok(())
    }
}
