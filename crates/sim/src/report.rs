//! Final-state rendering.

use std::fmt::Write;

use battle_core::{Action, BattleState, compute_actions_root};

/// Human-readable summary of a finished replay.
pub fn summary(state: &BattleState, actions: &[Action]) -> String {
    let mut out = String::new();
    let turn = state.turn();

    let _ = writeln!(
        out,
        "turn {} | phase {} | active {} | actions applied {}",
        turn.number,
        turn.phase,
        turn.active,
        state.action_counter()
    );

    for player in state.players() {
        let _ = writeln!(
            out,
            "{}: health {} resource {} | deck {} hand {} board {} discard {}",
            player.id,
            player.health,
            player.resource.current(),
            player.deck.len(),
            player.hand.len(),
            player.board.len(),
            player.discard.len()
        );
        for status in player.statuses.iter() {
            let _ = writeln!(out, "  status {} ({} turns)", status.id, status.remaining);
        }
    }

    let _ = writeln!(out, "rng draws:    {}", state.random_call_count());
    let _ = writeln!(out, "state root:   {}", hex::encode(state.state_root()));
    let _ = write!(out, "actions root: {}", hex::encode(compute_actions_root(actions)));
    out
}

/// Machine-readable report with the roots and the full final state.
pub fn json(state: &BattleState, actions: &[Action]) -> anyhow::Result<String> {
    let report = serde_json::json!({
        "state_root": hex::encode(state.state_root()),
        "actions_root": hex::encode(compute_actions_root(actions)),
        "state": state,
    });
    serde_json::to_string_pretty(&report)
        .map_err(|e| anyhow::anyhow!("Failed to serialize report: {}", e))
}

#[cfg(test)]
mod tests {
    use battle_core::CardTemplate;

    use super::*;

    #[test]
    fn summary_lists_every_seat_and_both_roots() {
        let deck = [CardTemplate::new("a", 0), CardTemplate::new("b", 0)];
        let state = BattleState::build_initial(&deck, &deck, 5).unwrap();

        let text = summary(&state, &[]);

        assert!(text.contains("P0: health 30"));
        assert!(text.contains("P1: health 30"));
        assert!(text.contains(&hex::encode(state.state_root())));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn json_report_embeds_state() {
        let deck = [CardTemplate::new("a", 0)];
        let state = BattleState::build_initial(&deck, &deck, 5).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&json(&state, &[]).unwrap()).unwrap();

        assert_eq!(report["state_root"], hex::encode(state.state_root()));
        assert!(report["state"].is_object());
    }
}
