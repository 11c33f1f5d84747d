mod bitmask;
mod changes;

pub use bitmask::{PlayerFields, TurnFields};
pub use changes::PlayerChanges;

use crate::action::Action;
use crate::state::BattleState;

/// Minimal description of an applied action's impact on the state.
///
/// Only metadata is recorded: which turn fields and which player fields
/// changed, and how many RNG draws the action consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    pub action: Action,

    /// Value of the action counter after this action.
    pub action_index: u64,

    pub turn: TurnFields,

    /// Changed players in seat order. Unchanged players are omitted.
    pub players: Vec<PlayerChanges>,

    pub rng_draws: u64,
}

impl StateDelta {
    /// Creates a delta by comparing the states around one action.
    pub fn from_states(action: Action, before: &BattleState, after: &BattleState) -> Self {
        let players = before
            .players()
            .iter()
            .zip(after.players())
            .filter_map(|(b, a)| PlayerChanges::from_states(b, a))
            .collect();

        Self {
            action,
            action_index: after.action_counter(),
            turn: changes::turn_fields(before.turn(), after.turn()),
            players,
            rng_draws: after.random_call_count() - before.random_call_count(),
        }
    }

    /// Returns true if no player or turn field changed.
    pub fn is_empty(&self) -> bool {
        self.turn.is_empty() && self.players.is_empty()
    }

    pub fn player(&self, id: crate::state::PlayerId) -> Option<PlayerFields> {
        self.players
            .iter()
            .find(|changes| changes.id == id)
            .map(|changes| changes.fields)
    }
}
