//! Commitment over an action log.

#[cfg(feature = "serde")]
use super::Action;

/// SHA-256 over the bincode encoding of each action, in order.
///
/// Together with [`BattleState::state_root`](crate::state::BattleState::state_root)
/// this lets a replay be checked without shipping full states: the same seed,
/// the same actions root and the same final state root mean the same match.
#[cfg(feature = "serde")]
pub fn compute_actions_root(actions: &[Action]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for (index, action) in actions.iter().enumerate() {
        match bincode::serialize(action) {
            Ok(action_bytes) => hasher.update(&action_bytes),
            Err(e) => tracing::error!(index, "action excluded from actions root: {e}"),
        }
    }

    hasher.finalize().into()
}
