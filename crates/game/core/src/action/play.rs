use crate::action::{ActionContext, ActionTransition};
use crate::state::{BattleState, EffectReference, InstanceId, InvariantViolation, PlayerId, ZoneKind};

/// Pays for a card in hand, moves it to the board, and queues its base effects.
///
/// Base effects are pushed in authored order, so the stack resolves them last
/// to first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCardAction {
    pub player: PlayerId,
    pub card: InstanceId,
}

impl PlayCardAction {
    pub fn new(player: PlayerId, card: InstanceId) -> Self {
        Self { player, card }
    }
}

impl ActionTransition for PlayCardAction {
    fn actor(&self) -> PlayerId {
        self.player
    }

    fn apply(
        &self,
        state: &mut BattleState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<(), InvariantViolation> {
        let catalog = state.context.catalog_handle();
        let player = state.player_mut(self.player)?;

        let template_id = &player
            .hand
            .get(self.card)
            .ok_or(InvariantViolation::CardMissing {
                instance: self.card,
            })?
            .template;
        let template = catalog.template(template_id)?;

        // Spend before moving so a failed payment leaves the card in hand.
        player.resource.spend(template.cost)?;
        let card = player
            .hand
            .remove(self.card)
            .ok_or(InvariantViolation::CardMissing {
                instance: self.card,
            })?;
        player.board.push(card);

        for effect in &template.effects {
            state.effect_stack.push(EffectReference::new(
                self.player,
                self.card,
                effect.clone(),
            ));
        }
        Ok(())
    }

    fn post_validate(&self, state: &BattleState) -> Result<(), InvariantViolation> {
        // Effects may move the card on; it must at least have left the hand.
        match state.locate_card(self.card) {
            Some((_, ZoneKind::Hand)) | None => Err(InvariantViolation::CardMissing {
                instance: self.card,
            }),
            Some(_) => Ok(()),
        }
    }
}
