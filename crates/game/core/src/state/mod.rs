//! Authoritative battle state representation.
//!
//! [`BattleState`] is one point-in-time snapshot of a match. It owns every
//! mutable sub-structure, so `clone()` is a full deep copy: mutating a clone
//! can never be observed through the original. Runtime layers query the state
//! freely but mutate it exclusively through [`crate::engine::GameEngine`].
pub mod delta;
mod error;
mod setup;
pub mod types;

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

pub use delta::{PlayerChanges, PlayerFields, StateDelta, TurnFields};
pub use error::{InvariantViolation, StateError};
pub use setup::{BattleSetup, SetupError};
pub use types::{
    CardInstance, CardZone, DAMAGE_BONUS, Deck, EffectReference, EffectStack, HEAL_BONUS,
    InstanceId, MatchContext, Mutation, MutationId, Phase, PlayerId, PlayerState, ResourceState,
    StatusEffect, StatusEffects, TurnState, ZoneKind,
};

use crate::catalog::CardCatalog;
use crate::config::BattleConfig;
use crate::rng::DeterministicRng;

/// Seat-ordered player list with a compile-time upper bound.
pub type Seats = ArrayVec<PlayerState, { BattleConfig::MAX_SEATS }>;

/// Canonical snapshot of the deterministic battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub(crate) players: Seats,
    pub(crate) turn: TurnState,
    pub(crate) effect_stack: EffectStack,
    pub(crate) context: MatchContext,

    /// RNG seed, fixed for the whole match.
    seed: u64,

    /// Number of RNG draws so far. Never decreases.
    random_call_count: u64,

    /// Number of fully applied actions. Never decreases.
    action_counter: u64,

    /// Sequential mutation id allocator.
    next_mutation_id: u32,
}

impl BattleState {
    pub(crate) fn new(players: Seats, context: MatchContext, seed: u64) -> Self {
        Self {
            players,
            turn: TurnState::new(),
            effect_stack: EffectStack::new(),
            context,
            seed,
            random_call_count: 0,
            action_counter: 0,
            next_mutation_id: 0,
        }
    }

    // ===== players =====

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// # Errors
    ///
    /// Returns `StateError::PlayerNotFound` if no seat has this id.
    pub fn player(&self, id: PlayerId) -> Result<&PlayerState, StateError> {
        self.players
            .iter()
            .find(|player| player.id == id)
            .ok_or(StateError::PlayerNotFound { player: id })
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut PlayerState, StateError> {
        self.players
            .iter_mut()
            .find(|player| player.id == id)
            .ok_or(StateError::PlayerNotFound { player: id })
    }

    /// Id of the seat after `id`, wrapping around the table.
    ///
    /// # Errors
    ///
    /// Returns `StateError::PlayerNotFound` if `id` is not seated.
    pub fn opponent_id(&self, id: PlayerId) -> Result<PlayerId, StateError> {
        let seat = self
            .players
            .iter()
            .position(|player| player.id == id)
            .ok_or(StateError::PlayerNotFound { player: id })?;
        Ok(self.players[(seat + 1) % self.players.len()].id)
    }

    /// # Errors
    ///
    /// Returns `StateError::PlayerNotFound` if `id` is not seated.
    pub fn opponent(&self, id: PlayerId) -> Result<&PlayerState, StateError> {
        let opponent = self.opponent_id(id)?;
        self.player(opponent)
    }

    pub fn health(&self, id: PlayerId) -> Result<i32, StateError> {
        Ok(self.player(id)?.health)
    }

    pub fn resource(&self, id: PlayerId) -> Result<u32, StateError> {
        Ok(self.player(id)?.resource.current())
    }

    // ===== turn & stack =====

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active
    }

    pub fn effect_stack(&self) -> &EffectStack {
        &self.effect_stack
    }

    pub fn context(&self) -> &MatchContext {
        &self.context
    }

    pub fn catalog(&self) -> &CardCatalog {
        self.context.catalog()
    }

    // ===== counters =====

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_call_count(&self) -> u64 {
        self.random_call_count
    }

    pub fn action_counter(&self) -> u64 {
        self.action_counter
    }

    /// Deterministic RNG bound to this state's seed and call counter.
    pub fn rng(&mut self) -> DeterministicRng<'_> {
        DeterministicRng::new(self.seed, &mut self.random_call_count)
    }

    pub(crate) fn increment_action_counter(&mut self) {
        self.action_counter += 1;
    }

    pub(crate) fn allocate_mutation_id(&mut self) -> MutationId {
        let id = MutationId(self.next_mutation_id);
        self.next_mutation_id = self.next_mutation_id.wrapping_add(1);
        id
    }

    // ===== cards =====

    /// Finds which player and zone currently hold a card.
    pub fn locate_card(&self, id: InstanceId) -> Option<(PlayerId, ZoneKind)> {
        self.players
            .iter()
            .find_map(|player| player.zone_of(id).map(|zone| (player.id, zone)))
    }

    pub fn card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.players
            .iter()
            .flat_map(PlayerState::all_cards)
            .find(|card| card.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.players
            .iter_mut()
            .find_map(|player| player.card_mut(id))
    }

    /// Verifies every card sits in exactly one zone of its owner.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation::ZoneConflict` for the first duplicated or
    /// misplaced instance id.
    pub fn check_zone_exclusivity(&self) -> Result<(), InvariantViolation> {
        let mut seen = BTreeSet::new();
        for player in &self.players {
            for card in player.all_cards() {
                if card.owner != player.id || !seen.insert(card.id) {
                    return Err(InvariantViolation::ZoneConflict { instance: card.id });
                }
            }
        }
        Ok(())
    }

    /// SHA-256 commitment to the full state.
    ///
    /// Two states with equal roots are bit-identical under bincode, which is
    /// what replay verification compares.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        match bincode::serialize(self) {
            Ok(bytes) => hasher.update(&bytes),
            Err(e) => tracing::error!(
                action_counter = self.action_counter(),
                "state could not be encoded, root covers nothing: {e}"
            ),
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CardTemplate;

    fn two_player_state() -> BattleState {
        let deck = vec![CardTemplate::new("a", 0), CardTemplate::new("b", 1)];
        BattleState::build_initial(&deck, &deck, 7).unwrap()
    }

    #[test]
    fn opponent_of_each_seat_is_the_other() {
        let state = two_player_state();

        assert_eq!(state.opponent_id(PlayerId::FIRST), Ok(PlayerId::SECOND));
        assert_eq!(state.opponent_id(PlayerId::SECOND), Ok(PlayerId::FIRST));
        assert_eq!(
            state.opponent(PlayerId(9)).map(|p| p.id),
            Err(StateError::PlayerNotFound {
                player: PlayerId(9)
            })
        );
    }

    #[test]
    fn clone_is_isolated_from_original() {
        let original = two_player_state();
        let mut clone = original.clone();

        clone.player_mut(PlayerId::FIRST).unwrap().draw().unwrap();
        clone.rng().next(0, 10);
        clone.increment_action_counter();

        assert_eq!(original.player(PlayerId::FIRST).unwrap().hand.len(), 0);
        assert_eq!(original.player(PlayerId::FIRST).unwrap().deck.len(), 2);
        assert_eq!(original.random_call_count(), 0);
        assert_eq!(original.action_counter(), 0);
        assert_ne!(original, clone);
    }

    #[test]
    fn zone_check_flags_duplicated_instances() {
        let mut state = two_player_state();
        state.check_zone_exclusivity().unwrap();

        let player = state.player_mut(PlayerId::FIRST).unwrap();
        let copy = player.deck.top().cloned().unwrap();
        player.board.push(copy.clone());

        assert_eq!(
            state.check_zone_exclusivity(),
            Err(InvariantViolation::ZoneConflict { instance: copy.id })
        );
    }

    #[test]
    fn locate_card_reports_owner_and_zone() {
        let mut state = two_player_state();
        let drawn = state.player_mut(PlayerId::SECOND).unwrap().draw().unwrap();

        assert_eq!(
            state.locate_card(drawn),
            Some((PlayerId::SECOND, ZoneKind::Hand))
        );
        assert_eq!(state.locate_card(InstanceId(999)), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn state_root_commits_to_encoded_state() {
        use sha2::{Digest, Sha256};

        let mut state = two_player_state();
        let root = state.state_root();
        let empty: [u8; 32] = Sha256::digest([]).into();

        assert_ne!(root, empty);
        assert_eq!(root, state.clone().state_root());

        state.player_mut(PlayerId::FIRST).unwrap().draw().unwrap();
        assert_ne!(root, state.state_root());
    }
}
