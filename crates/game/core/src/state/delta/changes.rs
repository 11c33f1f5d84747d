use crate::state::types::{PlayerState, TurnState};
use crate::state::PlayerId;

use super::bitmask::{PlayerFields, TurnFields};

/// Which fields of one player changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerChanges {
    pub id: PlayerId,
    pub fields: PlayerFields,
}

impl PlayerChanges {
    /// Returns `None` when nothing changed.
    pub(super) fn from_states(before: &PlayerState, after: &PlayerState) -> Option<Self> {
        debug_assert_eq!(before.id, after.id, "cannot compare different seats");

        let mut fields = PlayerFields::empty();
        if before.health != after.health {
            fields |= PlayerFields::HEALTH;
        }
        if before.deck != after.deck {
            fields |= PlayerFields::DECK;
        }
        if before.hand != after.hand {
            fields |= PlayerFields::HAND;
        }
        if before.board != after.board {
            fields |= PlayerFields::BOARD;
        }
        if before.discard != after.discard {
            fields |= PlayerFields::DISCARD;
        }
        if before.resource != after.resource {
            fields |= PlayerFields::RESOURCE;
        }
        if before.statuses != after.statuses {
            fields |= PlayerFields::STATUSES;
        }

        (!fields.is_empty()).then_some(Self {
            id: after.id,
            fields,
        })
    }
}

pub(super) fn turn_fields(before: &TurnState, after: &TurnState) -> TurnFields {
    let mut fields = TurnFields::empty();
    if before.number != after.number {
        fields |= TurnFields::NUMBER;
    }
    if before.active != after.active {
        fields |= TurnFields::ACTIVE;
    }
    if before.phase != after.phase {
        fields |= TurnFields::PHASE;
    }
    if before.actions_remaining != after.actions_remaining {
        fields |= TurnFields::ACTIONS_REMAINING;
    }
    fields
}
