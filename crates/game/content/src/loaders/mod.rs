//! Content loaders for reading battle data from files.
//!
//! Every loader returns [`LoadResult`]; errors carry the offending path and
//! the parser's message.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod scenario;

pub use catalog::{CatalogFile, CatalogLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::{Scenario, ScenarioLoader, ScriptStep};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
