use std::collections::BTreeMap;

use super::{InstanceId, MutationId, PlayerId};
use crate::catalog::{CardTemplate, EffectId, TemplateId};

/// Named, sourced set of stat deltas applied to a card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mutation {
    pub id: MutationId,
    /// What produced the mutation (an effect or upgrade id).
    pub source: String,
    pub stat_deltas: BTreeMap<String, i64>,
}

impl Mutation {
    pub fn new(id: MutationId, source: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            stat_deltas: BTreeMap::new(),
        }
    }

    pub fn with_delta(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.stat_deltas.insert(stat.into(), delta);
        self
    }
}

/// A concrete card in a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub id: InstanceId,
    pub template: TemplateId,
    pub owner: PlayerId,
    stats: BTreeMap<String, i64>,
    mutations: Vec<Mutation>,
    temporary_effects: Vec<EffectId>,
}

impl CardInstance {
    /// Instantiates a template, seeding stats from its base stats.
    pub fn from_template(id: InstanceId, owner: PlayerId, template: &CardTemplate) -> Self {
        Self {
            id,
            template: template.id.clone(),
            owner,
            stats: template.base_stats.clone(),
            mutations: Vec::new(),
            temporary_effects: Vec::new(),
        }
    }

    pub fn stat(&self, name: &str) -> Option<i64> {
        self.stats.get(name).copied()
    }

    pub fn stats(&self) -> &BTreeMap<String, i64> {
        &self.stats
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn temporary_effects(&self) -> &[EffectId] {
        &self.temporary_effects
    }

    /// Appends a mutation and folds its deltas into the current stats.
    ///
    /// Stats absent from the base template start at zero.
    pub fn apply_mutation(&mut self, mutation: Mutation) {
        for (stat, delta) in &mutation.stat_deltas {
            let value = self.stats.entry(stat.clone()).or_insert(0);
            *value = value.saturating_add(*delta);
        }
        self.mutations.push(mutation);
    }

    pub fn attach_temporary(&mut self, effect: EffectId) {
        self.temporary_effects.push(effect);
    }

    pub fn clear_temporary(&mut self) {
        self.temporary_effects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_fold_into_stats_in_order() {
        let template = CardTemplate::new("knight", 2).with_stat("attack", 3);
        let mut card = CardInstance::from_template(InstanceId(7), PlayerId::FIRST, &template);

        card.apply_mutation(Mutation::new(MutationId(0), "sharpen").with_delta("attack", 2));
        card.apply_mutation(
            Mutation::new(MutationId(1), "ward")
                .with_delta("attack", -1)
                .with_delta("armor", 4),
        );

        assert_eq!(card.stat("attack"), Some(4));
        assert_eq!(card.stat("armor"), Some(4));
        assert_eq!(card.mutations().len(), 2);
        assert_eq!(card.mutations()[0].source, "sharpen");
    }
}
