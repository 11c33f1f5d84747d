//! Parameter-driven semantics for each [`EffectKind`].

use crate::catalog::{EffectKind, EffectTarget};
use crate::state::{
    BattleState, CardInstance, DAMAGE_BONUS, EffectReference, HEAL_BONUS, InvariantViolation,
    Mutation, PlayerId, StatusEffect,
};

use super::EffectOutcome;

/// Applies the catalog definition behind `reference` to `state`.
pub(super) fn apply_effect(
    state: &mut BattleState,
    reference: &EffectReference,
) -> Result<EffectOutcome, InvariantViolation> {
    let catalog = state.context.catalog_handle();
    let Ok(definition) = catalog.effect(&reference.effect) else {
        tracing::debug!(effect = %reference.effect, "no definition in catalog; resolving as opaque");
        return Ok(EffectOutcome::Opaque);
    };

    match &definition.kind {
        EffectKind::Damage { target, amount } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            let total = with_bonus(*amount, state.context.modifier_or_zero(DAMAGE_BONUS));
            let player = state.player_mut(seat)?;
            player.health = player.health.saturating_sub(total);
        }
        EffectKind::Heal { target, amount } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            let total = with_bonus(*amount, state.context.modifier_or_zero(HEAL_BONUS));
            let player = state.player_mut(seat)?;
            player.health = player.health.saturating_add(total);
        }
        EffectKind::GainResource { target, amount } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            state.player_mut(seat)?.resource.gain(*amount);
        }
        EffectKind::DrawCards { target, count } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            let player = state.player_mut(seat)?;
            let drawable = (*count as usize).min(player.deck.len());
            if drawable < *count as usize {
                tracing::debug!(
                    player = %seat,
                    requested = count,
                    drawable,
                    "effect draw clamped to deck size"
                );
            }
            for _ in 0..drawable {
                player.draw()?;
            }
        }
        EffectKind::ApplyStatus {
            target,
            status,
            duration,
        } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            state
                .player_mut(seat)?
                .statuses
                .apply(StatusEffect::new(status.clone(), reference.source, *duration))
                .map_err(|_| InvariantViolation::StatusCapacity { player: seat })?;
        }
        EffectKind::ModifyStat { stat, delta } => {
            if state.card(reference.source).is_none() {
                return Ok(EffectOutcome::Fizzled);
            }
            let mutation = Mutation::new(state.allocate_mutation_id(), reference.effect.as_str())
                .with_delta(stat.clone(), *delta);
            source_card(state, reference)?.apply_mutation(mutation);
        }
        EffectKind::ApplyUpgrade { upgrade } => {
            let upgrade = catalog.upgrade(upgrade)?;
            if state.card(reference.source).is_none() {
                return Ok(EffectOutcome::Fizzled);
            }
            let mutation = Mutation {
                stat_deltas: upgrade.stat_deltas.clone(),
                ..Mutation::new(state.allocate_mutation_id(), upgrade.id.as_str())
            };
            source_card(state, reference)?.apply_mutation(mutation);
        }
        EffectKind::RandomDamage { target, min, max } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            let roll = state.rng().next(i64::from(*min), i64::from(*max));
            let roll = i32::try_from(roll).unwrap_or(*min);
            let total = with_bonus(roll, state.context.modifier_or_zero(DAMAGE_BONUS));
            let player = state.player_mut(seat)?;
            player.health = player.health.saturating_sub(total);
        }
        EffectKind::DiscardRandom { target } => {
            let Some(seat) = target_seat(state, reference, *target)? else {
                return Ok(EffectOutcome::Fizzled);
            };
            let hand_size = state.player(seat)?.hand.len();
            let Some(index) = state.rng().pick_index(hand_size) else {
                return Ok(EffectOutcome::Fizzled);
            };
            let player = state.player_mut(seat)?;
            let Some(card) = player.hand.remove_at(index) else {
                return Ok(EffectOutcome::Fizzled);
            };
            player.discard.push(card);
        }
        EffectKind::Attach { effect } => {
            let Some(card) = state.card_mut(reference.source) else {
                return Ok(EffectOutcome::Fizzled);
            };
            card.attach_temporary(effect.clone());
        }
        EffectKind::Chain { effects } => {
            for effect in effects {
                state.effect_stack.push(EffectReference::new(
                    reference.owner,
                    reference.source,
                    effect.clone(),
                ));
            }
        }
    }

    Ok(EffectOutcome::Applied)
}

/// Seat a player-level effect applies to. `None` when a `Source` target's
/// card is gone.
fn target_seat(
    state: &BattleState,
    reference: &EffectReference,
    target: EffectTarget,
) -> Result<Option<PlayerId>, InvariantViolation> {
    match target {
        EffectTarget::Owner => Ok(Some(reference.owner)),
        EffectTarget::Opponent => Ok(Some(state.opponent_id(reference.owner)?)),
        EffectTarget::Source => Ok(state.locate_card(reference.source).map(|(seat, _)| seat)),
    }
}

fn source_card<'a>(
    state: &'a mut BattleState,
    reference: &EffectReference,
) -> Result<&'a mut CardInstance, InvariantViolation> {
    state
        .card_mut(reference.source)
        .ok_or(InvariantViolation::CardMissing {
            instance: reference.source,
        })
}

/// Amount after a rule modifier, floored at zero.
fn with_bonus(amount: i32, bonus: i64) -> i32 {
    i64::from(amount)
        .saturating_add(bonus)
        .clamp(0, i64::from(i32::MAX)) as i32
}
