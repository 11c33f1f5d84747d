//! Status effects carried by players.
//!
//! Durations count owning-turn starts, not ticks: every turn start lowers each
//! remaining duration by one for every player. A duration that reaches zero
//! stays at zero and the status is reported as inactive until its slot is
//! needed by a new status.

use arrayvec::ArrayVec;

use super::InstanceId;
use crate::config::BattleConfig;

/// A single status with its remaining duration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub id: String,
    /// Card whose effect applied the status.
    pub source: InstanceId,
    pub remaining: u32,
}

impl StatusEffect {
    pub fn new(id: impl Into<String>, source: InstanceId, remaining: u32) -> Self {
        Self {
            id: id.into(),
            source,
            remaining,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Lowers the remaining duration by one, flooring at zero.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

/// Bounded set of statuses, at most one entry per status id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds a status, or refreshes an existing one with the same id.
    ///
    /// Refreshing keeps the longer of the two durations and takes the new source.
    ///
    /// # Errors
    ///
    /// Returns the rejected status if the id is new and every slot still
    /// holds an active status.
    pub fn apply(&mut self, status: StatusEffect) -> Result<(), StatusEffect> {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == status.id) {
            existing.remaining = existing.remaining.max(status.remaining);
            existing.source = status.source;
            return Ok(());
        }
        if self.effects.is_full() {
            self.remove_expired();
        }
        self.effects.try_push(status).map_err(|e| e.element())
    }

    /// Drops every status whose duration has run out.
    pub fn remove_expired(&mut self) {
        self.effects.retain(|effect| effect.is_active());
    }

    pub fn get(&self, id: &str) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.id == id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_some_and(StatusEffect::is_active)
    }

    pub fn tick_all(&mut self) {
        for effect in &mut self.effects {
            effect.tick();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
