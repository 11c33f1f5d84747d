use crate::action::{ActionContext, ActionTransition};
use crate::state::{BattleState, InvariantViolation, Phase, PlayerId};

/// Steps the current turn one phase forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvancePhaseAction {
    pub player: PlayerId,
    pub next: Phase,
}

impl AdvancePhaseAction {
    pub fn new(player: PlayerId, next: Phase) -> Self {
        Self { player, next }
    }
}

impl ActionTransition for AdvancePhaseAction {
    fn actor(&self) -> PlayerId {
        self.player
    }

    fn apply(
        &self,
        state: &mut BattleState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<(), InvariantViolation> {
        ctx.turns.advance_phase(state, self.next, ctx.resolver)
    }

    fn post_validate(&self, state: &BattleState) -> Result<(), InvariantViolation> {
        if state.phase() != self.next {
            return Err(InvariantViolation::IllegalPhaseStep {
                from: state.phase(),
                to: self.next,
            });
        }
        Ok(())
    }
}
