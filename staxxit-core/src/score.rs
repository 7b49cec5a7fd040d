//! End-of-game detection and scoring
//!
//! Runs after every accepted play-phase action, never during placement.
//! The match ends once either side has no stacks left on the inner board.

use crate::board::Board;
use crate::game::Player;
use serde::{Deserialize, Serialize};

/// Win determination; `winner: None` is a draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Option<Player>,
}

/// Check whether the board is terminal.
///
/// Classifies every stack by owner (top token) and region. If either
/// player controls zero inner stacks the game is over; the winner has more
/// exit-ring stacks, then more total exit-ring pieces, else it is a draw.
pub fn terminal_outcome(board: &Board) -> Option<Outcome> {
    let mut inner = [0usize; 2];
    let mut outer_stacks = [0usize; 2];
    let mut outer_pieces = [0usize; 2];

    for (hex, stack) in board.cells() {
        let Some(&owner) = stack.last() else { continue };
        let i = owner.index();
        if hex.is_outer() {
            outer_stacks[i] += 1;
            outer_pieces[i] += stack.len();
        } else {
            inner[i] += 1;
        }
    }

    if inner[0] != 0 && inner[1] != 0 {
        return None;
    }

    let winner = if outer_stacks[0] > outer_stacks[1] {
        Some(Player::White)
    } else if outer_stacks[1] > outer_stacks[0] {
        Some(Player::Black)
    } else if outer_pieces[0] > outer_pieces[1] {
        Some(Player::White)
    } else if outer_pieces[1] > outer_pieces[0] {
        Some(Player::Black)
    } else {
        None
    };
    Some(Outcome { winner })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::Hex;
    use Player::{Black, White};

    /// Build a board from (cell, owner, height) triples of uniform stacks
    fn board_of(stacks: &[(Hex, Player, usize)]) -> Board {
        let mut board = Board::new();
        for &(hex, player, height) in stacks {
            board.place(hex, player);
            for _ in 1..height {
                let scratch = Hex::new(0, 5);
                board.place(scratch, player);
                board.capture_merge(scratch, hex);
            }
        }
        board
    }

    #[test]
    fn test_ongoing_while_both_sides_hold_inner_cells() {
        let board = board_of(&[
            (Hex::new(0, 0), White, 1),
            (Hex::new(2, 0), Black, 1),
        ]);
        assert_eq!(terminal_outcome(&board), None);
    }

    #[test]
    fn test_piece_count_breaks_stack_tie() {
        // Zero White inner stacks; one outer stack each (1:1 tie), but
        // Black banked more pieces: 5 against 3.
        let board = board_of(&[
            (Hex::new(2, 0), Black, 1),
            (Hex::new(6, 0), White, 3),
            (Hex::new(0, 6), Black, 5),
        ]);
        let outcome = terminal_outcome(&board).unwrap();
        assert_eq!(outcome.winner, Some(Black));
    }

    #[test]
    fn test_stack_count_decides_before_piece_count() {
        // White banked two thin stacks, Black one tall one: White wins
        let board = board_of(&[
            (Hex::new(2, 0), White, 1),
            (Hex::new(6, 0), White, 1),
            (Hex::new(6, -6), White, 1),
            (Hex::new(0, 6), Black, 9),
        ]);
        let outcome = terminal_outcome(&board).unwrap();
        assert_eq!(outcome.winner, Some(White));
    }

    #[test]
    fn test_full_tie_is_a_draw() {
        let board = board_of(&[
            (Hex::new(2, 0), White, 1),
            (Hex::new(6, 0), White, 2),
            (Hex::new(0, 6), Black, 2),
        ]);
        let outcome = terminal_outcome(&board).unwrap();
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn test_empty_side_with_no_exits_loses_to_banked_stacks() {
        let board = board_of(&[
            (Hex::new(1, 1), White, 2),
            (Hex::new(-6, 6), Black, 1),
        ]);
        let outcome = terminal_outcome(&board).unwrap();
        assert_eq!(outcome.winner, Some(Black));
    }
}
