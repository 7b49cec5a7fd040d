//! End-to-end match flow through the public engine API

use staxxit_core::{Action, Hex, MatchState, Phase, Player};

/// Play the whole placement phase by always taking the first legal cell
fn place_all(mut state: MatchState) -> MatchState {
    let mut placements = 0;
    while state.phase() == Phase::Placing {
        let candidates = state.valid_placements();
        assert!(!candidates.is_empty(), "no legal placement at turn {placements}");
        let pos = candidates[0];
        let applied = state
            .apply_action(state.current_player(), &Action::Place { pos })
            .expect("first legal placement must be accepted");
        state = applied.state;
        placements += 1;
        assert!(placements <= 36, "placement phase did not terminate");
    }
    assert_eq!(placements, 36);
    state
}

#[test]
fn test_placement_phase_runs_to_playing() {
    let state = place_all(MatchState::new());
    assert_eq!(state.phase(), Phase::Playing);
    // 36 alternating placements: White opened, so White moves first again
    assert_eq!(state.current_player(), Player::White);
    assert_eq!(state.pieces_left(Player::White), 0);
    assert_eq!(state.pieces_left(Player::Black), 0);
    assert_eq!(state.board().cells().count(), 36);
    assert!(state.board().cells().all(|(hex, stack)| hex.is_inner() && stack.len() == 1));
}

#[test]
fn test_placement_alternates_strictly() {
    let mut state = MatchState::new();
    let mut expected = Player::White;
    while state.phase() == Phase::Placing {
        assert_eq!(state.current_player(), expected);
        // The other player is rejected out of hand
        let pos = state.valid_placements()[0];
        assert!(state
            .apply_action(expected.opponent(), &Action::Place { pos })
            .is_none());
        state = state.apply_action(expected, &Action::Place { pos }).unwrap().state;
        expected = expected.opponent();
    }
}

#[test]
fn test_some_play_action_is_available_after_placement() {
    let state = place_all(MatchState::new());
    let player = state.current_player();

    let origins: Vec<Hex> = state
        .board()
        .cells()
        .filter(|&(hex, stack)| hex.is_inner() && stack.last() == Some(&player))
        .map(|(hex, _)| hex)
        .collect();
    assert_eq!(origins.len(), 18);

    let mut accepted = None;
    'outer: for from in origins {
        let targets = state.legal_targets(from);
        for to in targets
            .captures
            .iter()
            .chain(&targets.moves)
            .chain(&targets.exits)
        {
            if let Some(applied) =
                state.apply_action(player, &Action::MoveOrCapture { from, to: *to })
            {
                accepted = Some(applied);
                break 'outer;
            }
        }
    }

    let applied = accepted.expect("the side to move has at least one legal action");
    assert_eq!(applied.state.current_player(), player.opponent());
    assert!(applied.state.last_action().is_some());
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let state = place_all(MatchState::new());
    let snapshot = state.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: staxxit_core::MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.phase, Phase::Playing);
    assert_eq!(back.cells, snapshot.cells);
    assert_eq!(back.occupied.len(), 36);
}
