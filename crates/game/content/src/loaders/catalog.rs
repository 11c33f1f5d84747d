//! Card catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{CardCatalog, CardTemplate, EffectDefinition, EffectKind, UpgradeTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for data files.
///
/// ```ron
/// (
///     templates: [
///         (id: "ember", cost: 1, effects: ["burn"], tags: ["fire"]),
///     ],
///     effects: [
///         (id: "burn", kind: Damage(target: Opponent, amount: 2)),
///     ],
///     upgrades: [],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub templates: Vec<CardTemplate>,
    #[serde(default)]
    pub effects: Vec<EffectDefinition>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeTemplate>,
}

impl CatalogFile {
    /// Checks cross references and builds the catalog.
    ///
    /// Duplicate ids and upgrades referenced but never defined are errors. Effect
    /// ids with no definition are allowed (they resolve as no-ops) and are
    /// only logged.
    pub fn into_catalog(self) -> LoadResult<CardCatalog> {
        let mut template_ids = BTreeSet::new();
        for template in &self.templates {
            if !template_ids.insert(&template.id) {
                anyhow::bail!("Duplicate card template id '{}'", template.id);
            }
        }
        let mut effect_ids = BTreeSet::new();
        for effect in &self.effects {
            if !effect_ids.insert(&effect.id) {
                anyhow::bail!("Duplicate effect id '{}'", effect.id);
            }
        }
        let upgrade_ids: BTreeSet<_> = self.upgrades.iter().map(|u| &u.id).collect();

        for effect in &self.effects {
            let EffectKind::ApplyUpgrade { upgrade } = &effect.kind else {
                continue;
            };
            if !upgrade_ids.contains(upgrade) {
                anyhow::bail!(
                    "Effect '{}' applies unknown upgrade '{}'",
                    effect.id,
                    upgrade
                );
            }
        }

        let referenced = self.templates.iter().flat_map(|template| {
            template
                .effects
                .iter()
                .chain(template.triggers.iter().map(|trigger| &trigger.effect))
                .map(move |effect| (&template.id, effect))
        });
        for (template, effect) in referenced {
            if !effect_ids.contains(effect) {
                tracing::warn!(%template, %effect, "effect has no definition and will resolve as a no-op");
            }
        }

        let catalog = self
            .templates
            .into_iter()
            .fold(CardCatalog::new(), CardCatalog::with_template);
        let catalog = self
            .effects
            .into_iter()
            .fold(catalog, CardCatalog::with_effect);
        Ok(self
            .upgrades
            .into_iter()
            .fold(catalog, CardCatalog::with_upgrade))
    }
}

/// Loader for card catalogs from RON or JSON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalog, choosing the format from the file extension
    /// (`.json` for JSON, anything else for RON).
    pub fn load(path: &Path) -> LoadResult<CardCatalog> {
        let content = read_file(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_ron(&content)
        }
        .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))?;

        tracing::info!(
            path = %path.display(),
            templates = catalog.template_count(),
            effects = catalog.effect_count(),
            "loaded card catalog"
        );
        Ok(catalog)
    }

    pub fn parse_ron(content: &str) -> LoadResult<CardCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        file.into_catalog()
    }

    pub fn parse_json(content: &str) -> LoadResult<CardCatalog> {
        let file: CatalogFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog JSON: {}", e))?;
        file.into_catalog()
    }

    /// The starter catalog bundled with this crate.
    pub fn starter() -> LoadResult<CardCatalog> {
        Self::parse_ron(include_str!("../../data/catalog.ron"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use battle_core::{EffectId, EffectTarget, Phase, TemplateId};

    use super::*;

    const SAMPLE: &str = r#"(
        templates: [
            (id: "ember", cost: 1, base_stats: {"power": 2}, effects: ["burn", "mystery"]),
            (id: "ward", cost: 0, triggers: [(phase: End, effect: "mend")], tags: ["defensive"]),
        ],
        effects: [
            (id: "burn", kind: Damage(target: Opponent, amount: 2)),
            (id: "mend", kind: Heal(target: Owner, amount: 1)),
        ],
    )"#;

    #[test]
    fn parses_ron_with_defaults() {
        let catalog = CatalogLoader::parse_ron(SAMPLE).unwrap();

        let ember = catalog.template(&TemplateId::from("ember")).unwrap();
        assert_eq!(ember.cost, 1);
        assert_eq!(ember.base_stats.get("power"), Some(&2));
        assert_eq!(ember.effects, vec![EffectId::from("burn"), EffectId::from("mystery")]);

        let ward = catalog.template(&TemplateId::from("ward")).unwrap();
        assert!(ward.has_tag("defensive"));
        assert_eq!(ward.triggers[0].phase, Phase::End);

        assert_eq!(
            catalog.effect(&EffectId::from("burn")).unwrap().kind,
            EffectKind::Damage {
                target: EffectTarget::Opponent,
                amount: 2
            }
        );
    }

    #[test]
    fn rejects_duplicates_and_dangling_upgrades() {
        let duplicate = r#"(templates: [(id: "a", cost: 0), (id: "a", cost: 1)])"#;
        let error = CatalogLoader::parse_ron(duplicate).unwrap_err();
        assert!(error.to_string().contains("Duplicate card template id 'a'"));

        let dangling = r#"(
            templates: [],
            effects: [(id: "hone", kind: ApplyUpgrade(upgrade: "edge"))],
        )"#;
        let error = CatalogLoader::parse_ron(dangling).unwrap_err();
        assert!(error.to_string().contains("unknown upgrade 'edge'"));
    }

    #[test]
    fn loads_json_by_extension() {
        let json = r#"{
            "templates": [{"id": "spark", "cost": 0, "effects": ["zap"]}],
            "effects": [{"id": "zap", "kind": {"RandomDamage": {"target": "Opponent", "min": 1, "max": 3}}}],
            "upgrades": [{"id": "edge", "stat_deltas": {"power": 1}}]
        }"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = CatalogLoader::load(file.path()).unwrap();

        assert_eq!(catalog.template_count(), 1);
        assert!(catalog.effect(&EffectId::from("zap")).unwrap().consumes_rng());
        assert!(catalog.upgrade(&"edge".into()).is_ok());
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = CatalogLoader::load(Path::new("/nonexistent/catalog.ron")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/catalog.ron"));
    }

    #[test]
    fn starter_catalog_is_consistent() {
        let catalog = CatalogLoader::starter().unwrap();
        assert!(catalog.template_count() >= 6);
    }
}
