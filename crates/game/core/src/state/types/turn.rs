use super::PlayerId;

/// Phases of a single turn, in the only legal order of travel.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Phase {
    #[default]
    Start,
    Main,
    Reaction,
    End,
}

impl Phase {
    /// The single forward step from this phase. `End` has none: the wrap back
    /// to `Start` only happens through a turn advance.
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Start => Some(Phase::Main),
            Phase::Main => Some(Phase::Reaction),
            Phase::Reaction => Some(Phase::End),
            Phase::End => None,
        }
    }

    pub const fn allows_draw(self) -> bool {
        matches!(self, Phase::Start | Phase::Main)
    }

    pub const fn allows_play(self) -> bool {
        matches!(self, Phase::Main)
    }

    pub const fn allows_end_turn(self) -> bool {
        matches!(self, Phase::Reaction | Phase::End)
    }
}

/// Turn bookkeeping. Mutated only by the turn manager.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Starts at 1.
    pub number: u32,
    pub active: PlayerId,
    pub phase: Phase,
    pub actions_remaining: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            number: 1,
            active: PlayerId::FIRST,
            phase: Phase::Start,
            actions_remaining: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
