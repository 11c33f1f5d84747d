use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::CardCatalog;
use crate::config::{BattleConfig, TurnStartRules};

/// Added to every `Damage` effect amount.
pub const DAMAGE_BONUS: &str = "damage_bonus";
/// Added to every `Heal` effect amount.
pub const HEAL_BONUS: &str = "heal_bonus";

/// Match-wide rules fixed at construction.
///
/// The catalog is shared read-only between a state and all of its clones;
/// everything else is copied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchContext {
    modifiers: BTreeMap<String, i64>,
    turn_start: TurnStartRules,
    max_resolutions: u32,
    catalog: Arc<CardCatalog>,
}

impl MatchContext {
    pub fn new(catalog: Arc<CardCatalog>, config: &BattleConfig) -> Self {
        Self {
            modifiers: config.rule_modifiers.clone(),
            turn_start: config.turn_start,
            max_resolutions: config.max_resolutions_per_action,
            catalog,
        }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Cloned handle for callers that need the catalog while mutating the state.
    pub fn catalog_handle(&self) -> Arc<CardCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn modifier(&self, name: &str) -> Option<i64> {
        self.modifiers.get(name).copied()
    }

    pub fn modifier_or_zero(&self, name: &str) -> i64 {
        self.modifier(name).unwrap_or(0)
    }

    pub fn modifiers(&self) -> &BTreeMap<String, i64> {
        &self.modifiers
    }

    pub fn turn_start(&self) -> TurnStartRules {
        self.turn_start
    }

    pub fn max_resolutions(&self) -> u32 {
        self.max_resolutions
    }
}
