use bitflags::bitflags;

bitflags! {
    /// Tracks which parts of a [`PlayerState`](crate::state::PlayerState) changed during an action.
    ///
    /// Each bit stands for one field. Values are not stored; they are read back
    /// from the before/after states when needed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFields: u8 {
        const HEALTH   = 1 << 0;
        const DECK     = 1 << 1;
        const HAND     = 1 << 2;
        const BOARD    = 1 << 3;
        const DISCARD  = 1 << 4;
        const RESOURCE = 1 << 5;
        const STATUSES = 1 << 6;
    }
}

bitflags! {
    /// Tracks which fields of [`TurnState`](crate::state::TurnState) changed during an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TurnFields: u8 {
        const NUMBER            = 1 << 0;
        const ACTIVE            = 1 << 1;
        const PHASE             = 1 << 2;
        const ACTIONS_REMAINING = 1 << 3;
    }
}
