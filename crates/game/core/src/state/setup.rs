//! Initial state construction.

use std::sync::Arc;

use crate::catalog::{CardCatalog, CardTemplate, CatalogError, TemplateId};
use crate::config::BattleConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleState, CardInstance, InstanceId, MatchContext, PlayerId, PlayerState, Seats};

/// Errors raised while assembling an initial state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("a battle needs between 1 and {max} seats (got {requested})")]
    SeatCount { requested: usize, max: usize },

    #[error("deck of seat {seat} references an unknown template: {source}")]
    UnknownTemplate { seat: usize, source: CatalogError },
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SeatCount { .. } => "SETUP_SEAT_COUNT",
            Self::UnknownTemplate { .. } => "SETUP_UNKNOWN_TEMPLATE",
        }
    }
}

/// Builder for a fresh battle.
///
/// Instance ids are allocated sequentially across seats in seat order, so the
/// same setup always yields the same ids.
#[derive(Clone, Debug)]
pub struct BattleSetup {
    catalog: Arc<CardCatalog>,
    decks: Vec<Vec<TemplateId>>,
    seed: u64,
    config: BattleConfig,
}

impl BattleSetup {
    pub fn new(catalog: Arc<CardCatalog>) -> Self {
        Self {
            catalog,
            decks: Vec::new(),
            seed: 0,
            config: BattleConfig::default(),
        }
    }

    /// Adds a seat whose deck holds the given templates, top card first.
    pub fn seat<I, T>(mut self, deck: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TemplateId>,
    {
        self.decks.push(deck.into_iter().map(Into::into).collect());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// - `SetupError::SeatCount` if no seats or more than `MAX_SEATS` were added
    /// - `SetupError::UnknownTemplate` if a deck names a template the catalog lacks
    pub fn build(self) -> Result<BattleState, SetupError> {
        let requested = self.decks.len();
        if requested == 0 || requested > BattleConfig::MAX_SEATS {
            return Err(SetupError::SeatCount {
                requested,
                max: BattleConfig::MAX_SEATS,
            });
        }

        let mut next_instance = 0u32;
        let mut players = Seats::new();
        for (seat, deck) in self.decks.iter().enumerate() {
            let owner = PlayerId(seat as u8);
            let cards = deck
                .iter()
                .map(|template_id| {
                    let template = self
                        .catalog
                        .template(template_id)
                        .map_err(|source| SetupError::UnknownTemplate { seat, source })?;
                    let card = CardInstance::from_template(InstanceId(next_instance), owner, template);
                    next_instance += 1;
                    Ok(card)
                })
                .collect::<Result<Vec<_>, SetupError>>()?;

            players.push(PlayerState::new(
                owner,
                self.config.starting_health,
                self.config.starting_resource,
                cards,
            ));
        }

        let context = MatchContext::new(self.catalog, &self.config);
        Ok(BattleState::new(players, context, self.seed))
    }
}

impl BattleState {
    /// Builds a two-player match whose catalog is the union of both decks.
    ///
    /// Health is 30, resources start at zero, and seat 0 opens turn 1 in the
    /// Start phase.
    ///
    /// # Errors
    ///
    /// Never fails for two seats; the `Result` mirrors [`BattleSetup::build`].
    pub fn build_initial(
        player_one: &[CardTemplate],
        player_two: &[CardTemplate],
        seed: u64,
    ) -> Result<Self, SetupError> {
        Self::build_initial_with_config(player_one, player_two, seed, BattleConfig::default())
    }

    pub fn build_initial_with_config(
        player_one: &[CardTemplate],
        player_two: &[CardTemplate],
        seed: u64,
        config: BattleConfig,
    ) -> Result<Self, SetupError> {
        let catalog = CardCatalog::from_templates(player_one.iter().chain(player_two));
        BattleSetup::new(Arc::new(catalog))
            .seat(player_one.iter().map(|t| t.id.clone()))
            .seat(player_two.iter().map(|t| t.id.clone()))
            .seed(seed)
            .config(config)
            .build()
    }
}
