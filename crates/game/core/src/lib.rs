//! Deterministic rules core for a turn-based card battle.
//!
//! `battle-core` defines the canonical battle state, the phase/turn machine,
//! the rule validator, and the effect stack, and exposes pure APIs that can be
//! reused by simulators, servers, and offline tools alike. All state mutation
//! flows through [`engine::GameEngine`]; the same seed and the same action
//! sequence always produce bit-identical states.
pub mod action;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod rng;
pub mod rules;
pub mod state;
pub mod turn;

pub use action::{
    Action, ActionContext, ActionKind, ActionTransition, AdvancePhaseAction, DrawCardAction,
    EndTurnAction, PlayCardAction,
};
#[cfg(feature = "serde")]
pub use action::compute_actions_root;
pub use catalog::{
    CardCatalog, CardTemplate, CatalogError, EffectDefinition, EffectId, EffectKind, EffectTarget,
    PhaseTrigger, TemplateId, UpgradeId, UpgradeTemplate,
};
pub use config::{BattleConfig, TurnStartRules};
pub use effect::{EffectOutcome, EffectResolver, ResolvedEffect};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use rng::DeterministicRng;
pub use rules::{RuleValidator, RuleViolation};
pub use state::{
    BattleSetup, BattleState, CardInstance, CardZone, Deck, EffectReference, EffectStack,
    InstanceId, InvariantViolation, MatchContext, Mutation, MutationId, Phase, PlayerChanges,
    PlayerFields, PlayerId, PlayerState, ResourceState, SetupError, StateDelta, StateError,
    StatusEffect, StatusEffects, TurnFields, TurnState, ZoneKind,
};
pub use turn::{BoardTriggerHook, PhaseHook, TurnManager, default_hooks};
