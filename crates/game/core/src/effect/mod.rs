//! Effect stack drainage.
//!
//! After an action's direct mutation the engine hands the state to an
//! [`EffectResolver`], which pops and resolves references until the stack is
//! empty. Resolving a reference may push further references, so drainage
//! loops rather than processing a single batch. The number of pops per action
//! is bounded by `BattleConfig::max_resolutions_per_action`; a chain that runs
//! past the bound is treated as a fatal invariant violation.

mod interpret;

use crate::state::{BattleState, EffectReference, InvariantViolation};

/// What resolving one reference did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectOutcome {
    /// The catalog definition was applied.
    Applied,
    /// The definition targets something that no longer exists (source card
    /// gone, empty hand); nothing changed.
    Fizzled,
    /// The catalog has no definition for this id. Resolves as a no-op.
    Opaque,
}

/// One popped reference, in actual resolution order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedEffect {
    pub reference: EffectReference,
    pub outcome: EffectOutcome,
}

/// Drains the pending-effect stack of a state.
///
/// One resolver is created per action; it accumulates the resolution log and
/// enforces the pop budget across every drain that action triggers.
#[derive(Clone, Debug)]
pub struct EffectResolver {
    limit: u32,
    pops: u32,
    resolved: Vec<ResolvedEffect>,
}

impl EffectResolver {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            pops: 0,
            resolved: Vec::new(),
        }
    }

    /// Resolver using the match's configured pop budget.
    pub fn for_state(state: &BattleState) -> Self {
        Self::new(state.context().max_resolutions())
    }

    /// Pops and resolves references until the stack is empty.
    ///
    /// Draining an empty stack is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] raised while resolving, or
    /// `ResolutionLimitExceeded` once the pop budget is spent.
    pub fn resolve_pending(&mut self, state: &mut BattleState) -> Result<(), InvariantViolation> {
        while !state.effect_stack.is_empty() {
            self.resolve_next(state)?;
        }
        Ok(())
    }

    /// Pops and resolves exactly one reference.
    ///
    /// # Errors
    ///
    /// Popping an empty stack is `InvariantViolation::EmptyEffectStack`; the
    /// public action path never reaches it.
    pub fn resolve_next(
        &mut self,
        state: &mut BattleState,
    ) -> Result<&ResolvedEffect, InvariantViolation> {
        if self.pops >= self.limit {
            return Err(InvariantViolation::ResolutionLimitExceeded { limit: self.limit });
        }
        let reference = state
            .effect_stack
            .pop()
            .ok_or(InvariantViolation::EmptyEffectStack)?;
        self.pops += 1;

        let outcome = interpret::apply_effect(state, &reference)?;
        tracing::trace!(
            effect = %reference.effect,
            source = %reference.source,
            owner = %reference.owner,
            outcome = outcome.as_ref(),
            "resolved effect"
        );

        self.resolved.push(ResolvedEffect { reference, outcome });
        Ok(&self.resolved[self.resolved.len() - 1])
    }

    pub fn pops(&self) -> u32 {
        self.pops
    }

    pub fn resolved(&self) -> &[ResolvedEffect] {
        &self.resolved
    }

    pub fn into_resolved(self) -> Vec<ResolvedEffect> {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{
        CardCatalog, CardTemplate, EffectDefinition, EffectKind, EffectTarget, UpgradeTemplate,
    };
    use crate::config::BattleConfig;
    use crate::state::{BattleSetup, InstanceId, PlayerId};

    fn catalog() -> CardCatalog {
        CardCatalog::new()
            .with_template(CardTemplate::new("unit", 0).with_stat("attack", 2))
            .with_effect(EffectDefinition::new(
                "hit",
                EffectKind::Damage {
                    target: EffectTarget::Opponent,
                    amount: 3,
                },
            ))
            .with_effect(EffectDefinition::new(
                "mend",
                EffectKind::Heal {
                    target: EffectTarget::Owner,
                    amount: 2,
                },
            ))
            .with_effect(EffectDefinition::new(
                "combo",
                EffectKind::Chain {
                    effects: vec!["hit".into(), "mend".into()],
                },
            ))
            .with_effect(EffectDefinition::new(
                "loop",
                EffectKind::Chain {
                    effects: vec!["loop".into()],
                },
            ))
            .with_effect(EffectDefinition::new(
                "sharpen",
                EffectKind::ApplyUpgrade {
                    upgrade: "edge".into(),
                },
            ))
            .with_effect(EffectDefinition::new(
                "chaos",
                EffectKind::RandomDamage {
                    target: EffectTarget::Opponent,
                    min: 1,
                    max: 4,
                },
            ))
            .with_upgrade(UpgradeTemplate::new("edge").with_delta("attack", 1))
    }

    fn state_with(config: BattleConfig) -> BattleState {
        BattleSetup::new(Arc::new(catalog()))
            .seat(["unit", "unit"])
            .seat(["unit"])
            .seed(9)
            .config(config)
            .build()
            .unwrap()
    }

    fn push(state: &mut BattleState, effect: &str) {
        state.effect_stack.push(EffectReference::new(
            PlayerId::FIRST,
            InstanceId(0),
            effect.into(),
        ));
    }

    #[test]
    fn drains_chained_effects_in_lifo_order() {
        let mut state = state_with(BattleConfig::default());
        push(&mut state, "combo");

        let mut resolver = EffectResolver::for_state(&state);
        resolver.resolve_pending(&mut state).unwrap();

        let order: Vec<_> = resolver
            .resolved()
            .iter()
            .map(|r| r.reference.effect.as_str().to_owned())
            .collect();
        assert_eq!(order, vec!["combo", "mend", "hit"]);
        assert!(state.effect_stack().is_empty());
        assert_eq!(state.health(PlayerId::FIRST), Ok(32));
        assert_eq!(state.health(PlayerId::SECOND), Ok(27));
    }

    #[test]
    fn unknown_effects_resolve_as_opaque() {
        let mut state = state_with(BattleConfig::default());
        let before = state.clone();
        push(&mut state, "nothing_here");

        let mut resolver = EffectResolver::for_state(&state);
        resolver.resolve_pending(&mut state).unwrap();

        assert_eq!(resolver.resolved()[0].outcome, EffectOutcome::Opaque);
        assert_eq!(state, before);
    }

    #[test]
    fn self_chaining_effect_hits_resolution_limit() {
        let config = BattleConfig {
            max_resolutions_per_action: 8,
            ..BattleConfig::default()
        };
        let mut state = state_with(config);
        push(&mut state, "loop");

        let mut resolver = EffectResolver::for_state(&state);
        assert_eq!(
            resolver.resolve_pending(&mut state),
            Err(InvariantViolation::ResolutionLimitExceeded { limit: 8 })
        );
        assert_eq!(resolver.pops(), 8);
    }

    #[test]
    fn popping_empty_stack_is_an_invariant_violation() {
        let mut state = state_with(BattleConfig::default());
        let mut resolver = EffectResolver::for_state(&state);

        resolver.resolve_pending(&mut state).unwrap();
        assert_eq!(
            resolver.resolve_next(&mut state).map(|r| r.outcome),
            Err(InvariantViolation::EmptyEffectStack)
        );
    }

    #[test]
    fn upgrade_appends_mutation_to_source() {
        let mut state = state_with(BattleConfig::default());
        push(&mut state, "sharpen");
        push(&mut state, "sharpen");

        EffectResolver::for_state(&state)
            .resolve_pending(&mut state)
            .unwrap();

        let card = state.card(InstanceId(0)).unwrap();
        assert_eq!(card.stat("attack"), Some(4));
        let ids: Vec<_> = card.mutations().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn random_damage_consumes_one_draw_and_replays_identically() {
        let mut first = state_with(BattleConfig::default());
        let mut second = first.clone();
        for state in [&mut first, &mut second] {
            push(state, "chaos");
            EffectResolver::for_state(state)
                .resolve_pending(state)
                .unwrap();
        }

        assert_eq!(first.random_call_count(), 1);
        assert_eq!(first, second);
        let dealt = 30 - first.health(PlayerId::SECOND).unwrap();
        assert!((1..4).contains(&dealt));
    }
}
