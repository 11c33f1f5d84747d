//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Every field is optional; omitted values fall back to the engine defaults.
///
/// ```toml
/// starting_health = 20
/// max_resolutions_per_action = 128
///
/// [turn_start]
/// resource_gain = 2
///
/// [rule_modifiers]
/// damage_bonus = 1
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), ?config, "loaded battle config");
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.max_resolutions_per_action == 0 {
            anyhow::bail!("max_resolutions_per_action must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            starting_health = 20

            [turn_start]
            draw_count = 2

            [rule_modifiers]
            damage_bonus = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.starting_health, 20);
        assert_eq!(config.turn_start.draw_count, 2);
        assert_eq!(
            config.turn_start.resource_gain,
            BattleConfig::DEFAULT_RESOURCE_GAIN
        );
        assert_eq!(config.rule_modifiers.get("damage_bonus"), Some(&1));
        assert_eq!(
            config.max_resolutions_per_action,
            BattleConfig::DEFAULT_MAX_RESOLUTIONS
        );
    }

    #[test]
    fn zero_resolution_limit_is_rejected() {
        let error = ConfigLoader::parse("max_resolutions_per_action = 0").unwrap_err();
        assert!(error.to_string().contains("at least 1"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "starting_resource = 3").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.starting_resource, 3);
        assert_eq!(config.starting_health, BattleConfig::DEFAULT_STARTING_HEALTH);
    }
}
