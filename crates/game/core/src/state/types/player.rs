use super::{CardInstance, CardZone, Deck, InstanceId, PlayerId, StatusEffects, ZoneKind};
use crate::state::StateError;

/// Non-negative spendable counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceState {
    current: u32,
}

impl ResourceState {
    pub fn new(current: u32) -> Self {
        Self { current }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn can_spend(&self, amount: u32) -> bool {
        self.current >= amount
    }

    /// # Errors
    ///
    /// Returns `StateError::InsufficientResource` and leaves the counter unchanged
    /// if `amount` exceeds the current value.
    pub fn spend(&mut self, amount: u32) -> Result<(), StateError> {
        self.current = self
            .current
            .checked_sub(amount)
            .ok_or(StateError::InsufficientResource {
                required: amount,
                available: self.current,
            })?;
        Ok(())
    }

    pub fn gain(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }
}

/// Everything one seat owns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    /// May go non-positive; loss detection belongs to the caller.
    pub health: i32,
    pub deck: Deck,
    pub hand: CardZone,
    pub board: CardZone,
    pub discard: CardZone,
    pub resource: ResourceState,
    pub statuses: StatusEffects,
}

impl PlayerState {
    pub fn new(id: PlayerId, health: i32, resource: u32, deck: Vec<CardInstance>) -> Self {
        Self {
            id,
            health,
            deck: Deck::new(deck),
            hand: CardZone::new(),
            board: CardZone::new(),
            discard: CardZone::new(),
            resource: ResourceState::new(resource),
            statuses: StatusEffects::empty(),
        }
    }

    /// Moves the top deck card into the hand and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `StateError::EmptyDeck` when the deck is exhausted.
    pub fn draw(&mut self) -> Result<InstanceId, StateError> {
        let card = self
            .deck
            .draw_top()
            .ok_or(StateError::EmptyDeck { player: self.id })?;
        let id = card.id;
        self.hand.push(card);
        Ok(id)
    }

    /// Locates a card in any of this player's zones.
    pub fn zone_of(&self, id: InstanceId) -> Option<ZoneKind> {
        if self.hand.contains(id) {
            Some(ZoneKind::Hand)
        } else if self.board.contains(id) {
            Some(ZoneKind::Board)
        } else if self.deck.contains(id) {
            Some(ZoneKind::Deck)
        } else if self.discard.contains(id) {
            Some(ZoneKind::Discard)
        } else {
            None
        }
    }

    pub(crate) fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        match self.zone_of(id)? {
            ZoneKind::Hand => self.hand.get_mut(id),
            ZoneKind::Board => self.board.get_mut(id),
            ZoneKind::Deck => self.deck.get_mut(id),
            ZoneKind::Discard => self.discard.get_mut(id),
        }
    }

    /// Drops every temporary effect attached to this player's cards.
    pub(crate) fn clear_temporary_effects(&mut self) {
        self.deck
            .iter_mut()
            .chain(self.hand.iter_mut())
            .chain(self.board.iter_mut())
            .chain(self.discard.iter_mut())
            .for_each(CardInstance::clear_temporary);
    }

    /// Iterates every card this player owns, zone by zone.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.deck
            .iter()
            .chain(self.hand.iter())
            .chain(self.board.iter())
            .chain(self.discard.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_rejects_overdraw_without_change() {
        let mut resource = ResourceState::new(2);

        let result = resource.spend(3);

        assert_eq!(
            result,
            Err(StateError::InsufficientResource {
                required: 3,
                available: 2
            })
        );
        assert_eq!(resource.current(), 2);
        resource.spend(2).unwrap();
        assert_eq!(resource.current(), 0);
    }

    #[test]
    fn draw_from_empty_deck_fails() {
        let mut player = PlayerState::new(PlayerId::FIRST, 30, 0, Vec::new());

        assert_eq!(
            player.draw(),
            Err(StateError::EmptyDeck {
                player: PlayerId::FIRST
            })
        );
        assert!(player.hand.is_empty());
    }
}
