//! Interpretable effect descriptors.
//!
//! Each definition pairs an [`EffectId`] with a parameterised [`EffectKind`].
//! The resolver in [`crate::effect`] is the only consumer.

use crate::catalog::{EffectId, UpgradeId};

/// Who an effect applies to, relative to the reference being resolved.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectTarget {
    /// The player that owns the reference.
    #[default]
    Owner,
    /// The seat after the owner.
    Opponent,
    /// The card that pushed the reference.
    Source,
}

/// Parameter-driven effect semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Lowers the target player's health. Adjusted by the `damage_bonus` modifier.
    Damage { target: EffectTarget, amount: i32 },

    /// Raises the target player's health. Adjusted by the `heal_bonus` modifier.
    Heal { target: EffectTarget, amount: i32 },

    GainResource { target: EffectTarget, amount: u32 },

    /// Moves up to `count` cards from the target's deck into their hand.
    DrawCards { target: EffectTarget, count: u32 },

    /// Adds a status to the target player, refreshing its duration if present.
    ApplyStatus {
        target: EffectTarget,
        status: String,
        duration: u32,
    },

    /// Appends a single-stat mutation to the source card.
    ModifyStat { stat: String, delta: i64 },

    /// Appends the catalog upgrade as a mutation on the source card.
    ApplyUpgrade { upgrade: UpgradeId },

    /// Damage rolled uniformly from `[min, max)`, then adjusted like `Damage`.
    RandomDamage {
        target: EffectTarget,
        min: i32,
        max: i32,
    },

    /// Moves a random card from the target's hand to their discard.
    DiscardRandom { target: EffectTarget },

    /// Attaches an effect to the source card until the end of the turn.
    Attach { effect: EffectId },

    /// Pushes further references from the same source, in listed order.
    Chain { effects: Vec<EffectId> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDefinition {
    pub id: EffectId,
    pub kind: EffectKind,
}

impl EffectDefinition {
    pub fn new(id: impl Into<EffectId>, kind: EffectKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Returns true if resolving this effect draws from the deterministic RNG.
    pub fn consumes_rng(&self) -> bool {
        matches!(
            self.kind,
            EffectKind::RandomDamage { .. } | EffectKind::DiscardRandom { .. }
        )
    }
}
