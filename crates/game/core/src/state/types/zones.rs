//! Owned card containers.
//!
//! Zones hold [`CardInstance`] values directly. Moving a card between zones
//! removes it from one container and pushes it into another, so a card can
//! never be reachable from two zones at once.

use super::{CardInstance, InstanceId};

/// Which container a card currently sits in.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ZoneKind {
    Deck,
    Hand,
    Board,
    Discard,
}

/// Ordered draw pile. Index 0 is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    cards: Vec<CardInstance>,
}

impl Deck {
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self { cards }
    }

    /// Removes and returns the top card, or `None` when the deck is exhausted.
    pub fn draw_top(&mut self) -> Option<CardInstance> {
        if self.cards.is_empty() {
            return None;
        }
        Some(self.cards.remove(0))
    }

    pub fn top(&self) -> Option<&CardInstance> {
        self.cards.first()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }
}

/// Unordered-by-rule collection used for hand, board, and discard.
///
/// Insertion order is preserved so iteration stays deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardZone {
    cards: Vec<CardInstance>,
}

impl CardZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    /// Removes the card with the given id, preserving the order of the rest.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<CardInstance> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardTemplate;
    use crate::state::PlayerId;

    fn card(id: u32) -> CardInstance {
        CardInstance::from_template(InstanceId(id), PlayerId::FIRST, &CardTemplate::new("c", 0))
    }

    #[test]
    fn deck_draws_from_index_zero() {
        let mut deck = Deck::new(vec![card(1), card(2)]);

        assert_eq!(deck.draw_top().map(|c| c.id), Some(InstanceId(1)));
        assert_eq!(deck.draw_top().map(|c| c.id), Some(InstanceId(2)));
        assert!(deck.draw_top().is_none());
    }

    #[test]
    fn zone_remove_keeps_remaining_order() {
        let mut zone = CardZone::new();
        zone.push(card(1));
        zone.push(card(2));
        zone.push(card(3));

        assert!(zone.remove(InstanceId(2)).is_some());
        assert!(zone.remove(InstanceId(2)).is_none());

        let ids: Vec<_> = zone.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![InstanceId(1), InstanceId(3)]);
    }
}
