use super::{InstanceId, PlayerId};
use crate::catalog::EffectId;

/// A pending resolution unit.
///
/// `source` names the card by id only; the authoritative card stays in
/// whichever zone holds it and is looked up again at resolution time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectReference {
    pub owner: PlayerId,
    pub source: InstanceId,
    pub effect: EffectId,
}

impl EffectReference {
    pub fn new(owner: PlayerId, source: InstanceId, effect: EffectId) -> Self {
        Self {
            owner,
            source,
            effect,
        }
    }
}

/// LIFO stack of pending effects. Last pushed resolves first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectStack {
    pending: Vec<EffectReference>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reference: EffectReference) {
        self.pending.push(reference);
    }

    pub fn pop(&mut self) -> Option<EffectReference> {
        self.pending.pop()
    }

    pub fn peek(&self) -> Option<&EffectReference> {
        self.pending.last()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending references from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &EffectReference> {
        self.pending.iter()
    }
}
