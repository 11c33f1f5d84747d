//! Read-only card, effect, and upgrade definitions.
//!
//! The catalog is authored outside the core and never appears inside a card
//! instance: instances carry a [`TemplateId`] and resolve it here lazily, so a
//! catalog update never requires rewriting instances. A match shares one
//! catalog through [`crate::state::MatchContext`].
mod effect;
mod error;

pub use effect::{EffectDefinition, EffectKind, EffectTarget};
pub use error::CatalogError;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::state::Phase;

macro_rules! catalog_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

catalog_key!(
    /// Stable identifier of a card template.
    TemplateId
);
catalog_key!(
    /// Stable identifier of an effect definition.
    EffectId
);
catalog_key!(
    /// Stable identifier of an upgrade definition.
    UpgradeId
);

/// Effect pushed whenever the owning card sits on the active player's board
/// as `phase` is entered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTrigger {
    pub phase: Phase,
    pub effect: EffectId,
}

/// Authored definition of a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardTemplate {
    pub id: TemplateId,
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_stats: BTreeMap<String, i64>,
    /// Effects pushed when the card is played, in authored order.
    ///
    /// The effect stack is LIFO, so these resolve last-to-first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<PhaseTrigger>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: BTreeSet<String>,
}

impl CardTemplate {
    pub fn new(id: impl Into<TemplateId>, cost: u32) -> Self {
        Self {
            id: id.into(),
            cost,
            base_stats: BTreeMap::new(),
            effects: Vec::new(),
            triggers: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_stat(mut self, name: impl Into<String>, value: i64) -> Self {
        self.base_stats.insert(name.into(), value);
        self
    }

    pub fn with_effect(mut self, effect: impl Into<EffectId>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_trigger(mut self, phase: Phase, effect: impl Into<EffectId>) -> Self {
        self.triggers.push(PhaseTrigger {
            phase,
            effect: effect.into(),
        });
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Authored stat package applied to a card as a [`crate::state::Mutation`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeTemplate {
    pub id: UpgradeId,
    pub stat_deltas: BTreeMap<String, i64>,
}

impl UpgradeTemplate {
    pub fn new(id: impl Into<UpgradeId>) -> Self {
        Self {
            id: id.into(),
            stat_deltas: BTreeMap::new(),
        }
    }

    pub fn with_delta(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.stat_deltas.insert(stat.into(), delta);
        self
    }
}

/// Immutable registry of templates keyed by identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardCatalog {
    templates: BTreeMap<TemplateId, CardTemplate>,
    effects: BTreeMap<EffectId, EffectDefinition>,
    upgrades: BTreeMap<UpgradeId, UpgradeTemplate>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from card templates only. Later duplicates replace earlier ones.
    pub fn from_templates<'a>(templates: impl IntoIterator<Item = &'a CardTemplate>) -> Self {
        let mut catalog = Self::new();
        for template in templates {
            catalog
                .templates
                .insert(template.id.clone(), template.clone());
        }
        catalog
    }

    pub fn with_template(mut self, template: CardTemplate) -> Self {
        self.templates.insert(template.id.clone(), template);
        self
    }

    pub fn with_effect(mut self, effect: EffectDefinition) -> Self {
        self.effects.insert(effect.id.clone(), effect);
        self
    }

    pub fn with_upgrade(mut self, upgrade: UpgradeTemplate) -> Self {
        self.upgrades.insert(upgrade.id.clone(), upgrade);
        self
    }

    /// Looks up a card template.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::TemplateNotFound` if the id is not registered.
    pub fn template(&self, id: &TemplateId) -> Result<&CardTemplate, CatalogError> {
        self.templates
            .get(id)
            .ok_or_else(|| CatalogError::TemplateNotFound(id.clone()))
    }

    /// Looks up an effect definition.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EffectNotFound` if the id is not registered.
    pub fn effect(&self, id: &EffectId) -> Result<&EffectDefinition, CatalogError> {
        self.effects
            .get(id)
            .ok_or_else(|| CatalogError::EffectNotFound(id.clone()))
    }

    /// Looks up an upgrade definition.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UpgradeNotFound` if the id is not registered.
    pub fn upgrade(&self, id: &UpgradeId) -> Result<&UpgradeTemplate, CatalogError> {
        self.upgrades
            .get(id)
            .ok_or_else(|| CatalogError::UpgradeNotFound(id.clone()))
    }

    pub fn templates(&self) -> impl Iterator<Item = &CardTemplate> {
        self.templates.values()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_reports_missing_ids() {
        let catalog = CardCatalog::new().with_template(CardTemplate::new("spark", 1));

        assert_eq!(catalog.template(&"spark".into()).unwrap().cost, 1);
        assert_eq!(
            catalog.template(&"ember".into()),
            Err(CatalogError::TemplateNotFound("ember".into()))
        );
        assert!(matches!(
            catalog.effect(&"burn".into()),
            Err(CatalogError::EffectNotFound(_))
        ));
    }

    #[test]
    fn from_templates_deduplicates_by_id() {
        let first = CardTemplate::new("spark", 1);
        let second = CardTemplate::new("spark", 2);

        let catalog = CardCatalog::from_templates([&first, &second]);

        assert_eq!(catalog.template_count(), 1);
        assert_eq!(catalog.template(&"spark".into()).unwrap().cost, 2);
    }
}
