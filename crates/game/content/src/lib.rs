//! Data-driven battle content and loaders.
//!
//! This crate houses authored content and provides loaders for RON/TOML/JSON
//! data files:
//! - Card catalogs (templates, effects, upgrades; RON or JSON)
//! - Battle configuration (TOML)
//! - Replay scenarios: seed, deck lists and an action script (RON)
//!
//! Content is consumed by the engine through `battle-core` types and never
//! embeds rules of its own.

pub mod deck;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use deck::{DeckEntry, DeckList};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, LoadResult, Scenario,
    ScenarioLoader, ScriptStep,
};
