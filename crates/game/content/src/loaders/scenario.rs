//! Replay scenarios: a seed, one deck list per seat, and an action script.

use std::path::Path;
use std::sync::Arc;

use battle_core::{
    Action, BattleConfig, BattleSetup, BattleState, CardCatalog, InstanceId, Phase, PlayerId,
};
use serde::{Deserialize, Serialize};

use crate::deck::DeckList;
use crate::loaders::{LoadResult, read_file};

/// One scripted step. Seats and instance ids are raw numbers so scripts stay
/// readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptStep {
    Advance { player: u8, to: Phase },
    Draw { player: u8, count: u32 },
    Play { player: u8, card: u32 },
    EndTurn { player: u8 },
    /// End of turn issued by a timer rather than the player.
    ForceEndTurn { player: u8 },
}

impl ScriptStep {
    pub fn to_action(self) -> Action {
        match self {
            ScriptStep::Advance { player, to } => Action::advance_phase(PlayerId(player), to),
            ScriptStep::Draw { player, count } => Action::draw_card(PlayerId(player), count),
            ScriptStep::Play { player, card } => {
                Action::play_card(PlayerId(player), InstanceId(card))
            }
            ScriptStep::EndTurn { player } => Action::end_turn(PlayerId(player)),
            ScriptStep::ForceEndTurn { player } => Action::force_end_turn(PlayerId(player)),
        }
    }
}

/// A reproducible match: the same scenario over the same catalog always
/// replays to the same state.
///
/// ```ron
/// (
///     seed: 42,
///     decks: [
///         (entries: [(template: "ember", copies: 3)]),
///         (entries: [(template: "ward")]),
///     ],
///     actions: [
///         Advance(player: 0, to: Main),
///         Play(player: 0, card: 0),
///     ],
/// )
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub seed: u64,
    pub decks: Vec<DeckList>,
    #[serde(default)]
    pub actions: Vec<ScriptStep>,
}

impl Scenario {
    /// The scripted actions in order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().map(|step| step.to_action())
    }

    /// Builds the opening state for this scenario.
    pub fn build_state(
        &self,
        catalog: Arc<CardCatalog>,
        config: BattleConfig,
    ) -> LoadResult<BattleState> {
        for (seat, deck) in self.decks.iter().enumerate() {
            deck.validate(&catalog)
                .map_err(|e| anyhow::anyhow!("Deck for seat {} is invalid: {}", seat, e))?;
        }

        let setup = self
            .decks
            .iter()
            .fold(BattleSetup::new(catalog), |setup, deck| {
                setup.seat(deck.expand())
            });
        setup
            .seed(self.seed)
            .config(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to set up scenario: {}", e))
    }
}

/// Loader for [`Scenario`] files in RON format.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load scenario {}: {}", path.display(), e))?;

        tracing::debug!(
            path = %path.display(),
            seats = scenario.decks.len(),
            steps = scenario.actions.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{CardTemplate, GameEngine};

    use super::*;

    fn catalog() -> Arc<CardCatalog> {
        Arc::new(
            CardCatalog::new()
                .with_template(CardTemplate::new("ember", 0))
                .with_template(CardTemplate::new("ward", 0)),
        )
    }

    const SCRIPT: &str = r#"(
        seed: 7,
        decks: [
            (entries: [(template: "ember", copies: 2), (template: "ward")]),
            (entries: [(template: "ward", copies: 3)]),
        ],
        actions: [
            Draw(player: 0, count: 1),
            Advance(player: 0, to: Main),
            Play(player: 0, card: 0),
            Advance(player: 0, to: Reaction),
            EndTurn(player: 0),
        ],
    )"#;

    #[test]
    fn script_parses_into_actions() {
        let scenario = ScenarioLoader::parse(SCRIPT).unwrap();

        assert_eq!(scenario.seed, 7);
        assert_eq!(scenario.decks[0].size(), 3);

        let actions: Vec<_> = scenario.actions().collect();
        assert_eq!(actions[0], Action::draw_card(PlayerId(0), 1));
        assert_eq!(actions[2], Action::play_card(PlayerId(0), InstanceId(0)));
        assert_eq!(actions[4], Action::end_turn(PlayerId(0)));
    }

    #[test]
    fn scenario_replays_through_the_engine() {
        let scenario = ScenarioLoader::parse(SCRIPT).unwrap();
        let state = scenario
            .build_state(catalog(), BattleConfig::default())
            .unwrap();
        assert_eq!(state.seed(), 7);
        assert_eq!(state.player(PlayerId(1)).unwrap().deck.len(), 3);

        let mut engine = GameEngine::new(state);
        for action in scenario.actions() {
            engine.apply_action(&action).unwrap();
        }

        let state = engine.state();
        assert_eq!(state.active_player(), PlayerId(1));
        assert_eq!(state.action_counter(), 5);
        assert!(
            state
                .player(PlayerId(0))
                .unwrap()
                .board
                .contains(InstanceId(0))
        );
    }

    #[test]
    fn unknown_deck_template_is_reported_with_seat() {
        let scenario = ScenarioLoader::parse(
            r#"(decks: [(entries: [(template: "ember")]), (entries: [(template: "ghost")])])"#,
        )
        .unwrap();

        let error = scenario
            .build_state(catalog(), BattleConfig::default())
            .unwrap_err();
        assert!(error.to_string().contains("seat 1"));
    }
}
