//! Environment overrides for a replay run.
use std::env;

/// Settings read from `BATTLE_*` environment variables.
///
/// Environment variables:
/// - `BATTLE_SEED` - Replaces the scenario seed
/// - `BATTLE_MAX_RESOLUTIONS` - Overrides `max_resolutions_per_action` (minimum 1)
/// - `BATTLE_CONTINUE_ON_REJECT` - Keep replaying after a rejected action (default: false)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: Option<u64>,
    pub max_resolutions: Option<u32>,
    pub continue_on_reject: bool,
}

impl SimConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = read_var::<u64>(&lookup, "BATTLE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(limit) = read_var::<u32>(&lookup, "BATTLE_MAX_RESOLUTIONS") {
            config.max_resolutions = Some(limit.max(1));
        }
        if let Some(flag) = read_bool(&lookup, "BATTLE_CONTINUE_ON_REJECT") {
            config.continue_on_reject = flag;
        }

        config
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

fn read_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(config_from(&[]), SimConfig::default());
    }

    #[test]
    fn parses_overrides_and_ignores_garbage() {
        let config = config_from(&[
            ("BATTLE_SEED", "99"),
            ("BATTLE_MAX_RESOLUTIONS", "0"),
            ("BATTLE_CONTINUE_ON_REJECT", "Yes"),
        ]);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.max_resolutions, Some(1));
        assert!(config.continue_on_reject);

        let config = config_from(&[("BATTLE_SEED", "abc"), ("BATTLE_CONTINUE_ON_REJECT", "maybe")]);
        assert_eq!(config.seed, None);
        assert!(!config.continue_on_reject);
    }
}
