use std::collections::BTreeMap;

/// Rules applied to the player whose turn is starting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnStartRules {
    /// Resource granted to the new active player.
    pub resource_gain: u32,
    /// Cards drawn by the new active player (clamped to the deck size).
    pub draw_count: u32,
    /// Value written to `TurnState::actions_remaining`.
    pub actions_per_turn: u32,
}

impl Default for TurnStartRules {
    fn default() -> Self {
        Self {
            resource_gain: BattleConfig::DEFAULT_RESOURCE_GAIN,
            draw_count: BattleConfig::DEFAULT_DRAW_COUNT,
            actions_per_turn: BattleConfig::DEFAULT_ACTIONS_PER_TURN,
        }
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub starting_health: i32,
    pub starting_resource: u32,
    pub turn_start: TurnStartRules,

    /// Upper bound on effect references popped while draining one action.
    ///
    /// Authored chains that re-push themselves would otherwise never terminate.
    pub max_resolutions_per_action: u32,

    /// Named integer modifiers copied into the match context.
    pub rule_modifiers: BTreeMap<String, i64>,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_SEATS: usize = 4;
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_HEALTH: i32 = 30;
    pub const DEFAULT_STARTING_RESOURCE: u32 = 0;
    pub const DEFAULT_RESOURCE_GAIN: u32 = 1;
    pub const DEFAULT_DRAW_COUNT: u32 = 1;
    pub const DEFAULT_ACTIONS_PER_TURN: u32 = 1;
    pub const DEFAULT_MAX_RESOLUTIONS: u32 = 256;

    pub fn new() -> Self {
        Self {
            starting_health: Self::DEFAULT_STARTING_HEALTH,
            starting_resource: Self::DEFAULT_STARTING_RESOURCE,
            turn_start: TurnStartRules::default(),
            max_resolutions_per_action: Self::DEFAULT_MAX_RESOLUTIONS,
            rule_modifiers: BTreeMap::new(),
        }
    }

    pub fn with_turn_start(mut self, turn_start: TurnStartRules) -> Self {
        self.turn_start = turn_start;
        self
    }

    pub fn with_modifier(mut self, name: impl Into<String>, value: i64) -> Self {
        self.rule_modifiers.insert(name.into(), value);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
