mod card;
mod common;
mod context;
mod player;
mod stack;
mod status;
mod turn;
mod zones;

pub use card::{CardInstance, Mutation};
pub use common::{InstanceId, MutationId, PlayerId};
pub use context::{DAMAGE_BONUS, HEAL_BONUS, MatchContext};
pub use player::{PlayerState, ResourceState};
pub use stack::{EffectReference, EffectStack};
pub use status::{StatusEffect, StatusEffects};
pub use turn::{Phase, TurnState};
pub use zones::{CardZone, Deck, ZoneKind};
