//! Factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, CardCatalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Resolves content files under a single data directory:
///
/// ```text
/// <data_dir>/catalog.ron
/// <data_dir>/config.toml          (optional)
/// <data_dir>/scenarios/<name>.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_catalog(&self) -> LoadResult<CardCatalog> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }

    /// Loads `config.toml`, or the defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.data_dir.join("scenarios").join(format!("{name}.ron")))
    }
}
