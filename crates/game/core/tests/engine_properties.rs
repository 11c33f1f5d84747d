use std::sync::Arc;

use battle_core::{
    Action, BattleConfig, BattleSetup, BattleState, CardCatalog, CardTemplate, EffectDefinition,
    EffectKind, EffectTarget, GameEngine, Phase, PlayerId, RuleViolation,
};

fn skirmish_catalog() -> CardCatalog {
    CardCatalog::new()
        .with_template(CardTemplate::new("spark", 0).with_effect("spark"))
        .with_template(CardTemplate::new("purge", 1).with_effect("purge"))
        .with_template(CardTemplate::new("study", 0).with_effect("study"))
        .with_template(
            CardTemplate::new("idol", 2)
                .with_trigger(Phase::Reaction, "spark")
                .with_effect("bless"),
        )
        .with_effect(EffectDefinition::new(
            "spark",
            EffectKind::RandomDamage {
                target: EffectTarget::Opponent,
                min: 1,
                max: 6,
            },
        ))
        .with_effect(EffectDefinition::new(
            "purge",
            EffectKind::DiscardRandom {
                target: EffectTarget::Opponent,
            },
        ))
        .with_effect(EffectDefinition::new(
            "study",
            EffectKind::DrawCards {
                target: EffectTarget::Owner,
                count: 2,
            },
        ))
        .with_effect(EffectDefinition::new(
            "bless",
            EffectKind::Attach {
                effect: "spark".into(),
            },
        ))
}

fn skirmish(seed: u64) -> BattleState {
    let deck = [
        "spark", "study", "purge", "idol", "spark", "purge", "study", "idol", "spark", "spark",
        "purge", "study",
    ];
    BattleSetup::new(Arc::new(skirmish_catalog()))
        .seat(deck)
        .seat(deck.iter().rev().copied())
        .seed(seed)
        .build()
        .unwrap()
}

fn apply(engine: &mut GameEngine, log: &mut Vec<Action>, action: Action) {
    engine.apply_action(&action).unwrap();
    engine.state().check_zone_exclusivity().unwrap();
    log.push(action);
}

/// Greedy scripted turn: draw if possible, play every affordable card, end.
fn play_turn(engine: &mut GameEngine, log: &mut Vec<Action>) {
    let me = engine.state().active_player();

    apply(engine, log, Action::advance_phase(me, Phase::Main));
    if engine.validate(&Action::draw_card(me, 1)).is_ok() {
        apply(engine, log, Action::draw_card(me, 1));
    }
    loop {
        let playable = engine
            .state()
            .player(me)
            .unwrap()
            .hand
            .iter()
            .map(|card| card.id)
            .find(|&id| engine.validate(&Action::play_card(me, id)).is_ok());
        match playable {
            Some(card) => apply(engine, log, Action::play_card(me, card)),
            None => break,
        }
    }
    apply(engine, log, Action::advance_phase(me, Phase::Reaction));
    apply(engine, log, Action::end_turn(me));
}

fn run(seed: u64, turns: usize) -> (GameEngine, Vec<Action>) {
    let mut engine = GameEngine::new(skirmish(seed));
    let mut log = Vec::new();
    for _ in 0..turns {
        play_turn(&mut engine, &mut log);
    }
    (engine, log)
}

#[test]
fn same_seed_and_actions_give_identical_states() {
    let (first, log) = run(42, 10);
    let (second, replay_log) = run(42, 10);

    assert_eq!(log, replay_log);
    assert_eq!(first.state(), second.state());
    assert!(first.state().random_call_count() > 0);
    assert_eq!(first.state().action_counter(), log.len() as u64);

    // Replaying the recorded log against a fresh engine also matches.
    let mut replayed = GameEngine::new(skirmish(42));
    for action in &log {
        replayed.apply_action(action).unwrap();
    }
    assert_eq!(replayed.state(), first.state());
}

#[cfg(feature = "serde")]
#[test]
fn replay_roots_match() {
    let (first, log) = run(7, 6);
    let (second, _) = run(7, 6);

    assert_eq!(first.state().state_root(), second.state().state_root());
    let full = hex::encode(battle_core::compute_actions_root(&log));
    let truncated = hex::encode(battle_core::compute_actions_root(&log[..log.len() - 1]));
    assert_eq!(full.len(), 64);
    assert_ne!(full, truncated);

    let (other_seed, _) = run(8, 6);
    assert_ne!(first.state().state_root(), other_seed.state().state_root());
}

#[test]
fn mutating_a_clone_never_touches_the_original() {
    let (engine, _) = run(3, 2);
    let snapshot = engine.clone_state();

    let mut fork = GameEngine::new(engine.clone_state());
    let mut log = Vec::new();
    play_turn(&mut fork, &mut log);
    play_turn(&mut fork, &mut log);

    assert_eq!(engine.state(), &snapshot);
    assert_ne!(fork.state(), &snapshot);
    assert!(fork.state().action_counter() > snapshot.action_counter());
    assert!(fork.state().random_call_count() >= snapshot.random_call_count());
}

#[test]
fn phase_cycle_only_accepts_forward_edges() {
    let mut engine = GameEngine::new(skirmish(1));
    let me = PlayerId::FIRST;

    let illegal = |engine: &mut GameEngine, to: Phase| {
        let from = engine.state().phase();
        let error = engine
            .apply_action(&Action::advance_phase(me, to))
            .unwrap_err();
        assert_eq!(
            error.violation(),
            Some(&RuleViolation::IllegalPhaseTransition { from, to })
        );
    };

    illegal(&mut engine, Phase::Reaction);
    illegal(&mut engine, Phase::Start);
    engine
        .apply_action(&Action::advance_phase(me, Phase::Main))
        .unwrap();
    illegal(&mut engine, Phase::Main);
    illegal(&mut engine, Phase::Start);
    engine
        .apply_action(&Action::advance_phase(me, Phase::Reaction))
        .unwrap();
    engine
        .apply_action(&Action::advance_phase(me, Phase::End))
        .unwrap();
    illegal(&mut engine, Phase::Start);

    engine.apply_action(&Action::end_turn(me)).unwrap();
    assert_eq!(engine.state().phase(), Phase::Start);
    assert_eq!(engine.state().turn().number, 2);
}

#[test]
fn play_never_overspends_resource() {
    let catalog = CardCatalog::new().with_template(CardTemplate::new("golem", 2));
    let config = BattleConfig {
        starting_resource: 3,
        ..BattleConfig::default()
    };
    let state = BattleSetup::new(Arc::new(catalog))
        .seat(["golem", "golem"])
        .seat(["golem"])
        .config(config)
        .build()
        .unwrap();
    let mut engine = GameEngine::new(state);
    let me = PlayerId::FIRST;

    engine
        .apply_action(&Action::advance_phase(me, Phase::Main))
        .unwrap();
    engine.apply_action(&Action::draw_card(me, 2)).unwrap();
    let cards: Vec<_> = engine
        .state()
        .player(me)
        .unwrap()
        .hand
        .iter()
        .map(|card| card.id)
        .collect();

    engine.apply_action(&Action::play_card(me, cards[0])).unwrap();
    assert_eq!(engine.state().resource(me), Ok(1));

    let error = engine
        .apply_action(&Action::play_card(me, cards[1]))
        .unwrap_err();
    assert_eq!(
        error.violation(),
        Some(&RuleViolation::InsufficientResources {
            required: 2,
            available: 1
        })
    );
    assert_eq!(engine.state().resource(me), Ok(1));
}

#[test]
fn base_effects_resolve_last_declared_first() {
    let catalog = CardCatalog::new().with_template(
        CardTemplate::new("triple", 0)
            .with_effect("e1")
            .with_effect("e2")
            .with_effect("e3"),
    );
    let state = BattleSetup::new(Arc::new(catalog))
        .seat(["triple"])
        .seat(["triple"])
        .build()
        .unwrap();
    let mut engine = GameEngine::new(state);
    let me = PlayerId::FIRST;

    engine
        .apply_action(&Action::advance_phase(me, Phase::Main))
        .unwrap();
    engine.apply_action(&Action::draw_card(me, 1)).unwrap();
    let card = engine.state().player(me).unwrap().hand.iter().next().unwrap().id;
    let outcome = engine.apply_action(&Action::play_card(me, card)).unwrap();

    let order: Vec<_> = outcome
        .resolved
        .iter()
        .map(|resolved| resolved.reference.effect.as_str())
        .collect();
    assert_eq!(order, vec!["e3", "e2", "e1"]);
    assert!(engine.state().effect_stack().is_empty());
}

#[test]
fn every_card_stays_in_exactly_one_zone() {
    let (engine, log) = run(11, 12);
    assert!(!log.is_empty());

    for player in engine.state().players() {
        assert_eq!(player.all_cards().count(), 12);
    }
    engine.state().check_zone_exclusivity().unwrap();
}
