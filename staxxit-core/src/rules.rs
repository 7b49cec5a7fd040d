//! Move, capture, exit, and split generation
//!
//! All generators derive the acting stack's height from the board at the
//! origin. Captures and exits are height-exact: the target sits exactly
//! `h` cells away along a clear ray. Inner moves may stop at any empty
//! cell along a clear ray up to length `h`. The asymmetry is deliberate
//! and part of the rules, not an oversight.

use crate::board::Board;
use crate::game::{Player, PIECES_PER_PLAYER};
use crate::hex::{outer_colors, Hex, DIRECTIONS};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Stacks must be strictly taller than this to split
pub const SPLIT_MIN_HEIGHT: usize = 11;

/// Every cell strictly between `from` and `from + steps * dir` must be
/// inner and empty. Rays of 0 or 1 steps have no intermediate cells.
pub fn path_clear(board: &Board, from: Hex, dir: (i8, i8), steps: i8) -> bool {
    (1..steps).all(|i| {
        let cell = from.offset(dir, i);
        cell.is_inner() && board.is_empty_cell(cell)
    })
}

/// Capture targets: enemy-topped stacks exactly `h` cells away on a clear ray
pub fn capture_targets(board: &Board, pos: Hex, player: Player) -> Vec<Hex> {
    let h = board.height(pos) as i8;
    let mut targets = Vec::new();
    for dir in DIRECTIONS {
        let target = pos.offset(dir, h);
        if !target.is_inner() || !path_clear(board, pos, dir, h) {
            continue;
        }
        if board.owner(target).is_some_and(|owner| owner != player) {
            targets.push(target);
        }
    }
    targets
}

/// Inner move targets: every empty inner cell along a clear ray, up to `h`
pub fn move_targets(board: &Board, pos: Hex) -> Vec<Hex> {
    let h = board.height(pos) as i8;
    let mut targets = Vec::new();
    for dir in DIRECTIONS {
        for k in 1..=h {
            let cell = pos.offset(dir, k);
            if !cell.is_inner() || !board.is_empty_cell(cell) {
                break;
            }
            targets.push(cell);
        }
    }
    targets
}

/// Exit targets: empty exit-ring cells exactly `h` cells away on a clear
/// ray, whose color label accepts the player
pub fn exit_targets(board: &Board, pos: Hex, player: Player) -> Vec<Hex> {
    let h = board.height(pos) as i8;
    let mut targets = Vec::new();
    for dir in DIRECTIONS {
        let target = pos.offset(dir, h);
        if !target.is_outer() || !path_clear(board, pos, dir, h) {
            continue;
        }
        if !board.is_empty_cell(target) {
            continue;
        }
        if outer_colors().get(target).is_some_and(|c| c.accepts(player)) {
            targets.push(target);
        }
    }
    targets
}

/// Split destinations: the immediate empty inner neighbors of the origin.
/// No range or directionality; height gating is the caller's concern.
pub fn split_targets(board: &Board, pos: Hex) -> Vec<Hex> {
    pos.neighbors()
        .into_iter()
        .filter(|&n| n.is_inner() && board.is_empty_cell(n))
        .collect()
}

/// Whether any inner stack topped by `player` has a capture available.
/// A true result makes capturing mandatory everywhere on the board.
pub fn has_any_capture(board: &Board, player: Player) -> bool {
    board.cells().any(|(hex, stack)| {
        hex.is_inner()
            && stack.last() == Some(&player)
            && !capture_targets(board, hex, player).is_empty()
    })
}

/// Resolved class of a play-phase destination
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Capture,
    Move,
    Exit,
    Split,
}

/// All legal destinations from one origin, computed in a single pass.
///
/// When a capture exists anywhere for the player, only `captures` is
/// populated: an origin with no captures of its own has no legal targets
/// at all that turn.
#[derive(Clone, Debug, Default)]
pub struct LegalTargets {
    pub mandatory_capture: bool,
    pub captures: Vec<Hex>,
    pub moves: Vec<Hex>,
    pub exits: Vec<Hex>,
    pub splits: Vec<Hex>,
}

impl LegalTargets {
    /// Resolve a destination, checking capture, then move, exit, split
    pub fn classify(&self, to: Hex) -> Option<MoveKind> {
        if self.captures.contains(&to) {
            Some(MoveKind::Capture)
        } else if self.moves.contains(&to) {
            Some(MoveKind::Move)
        } else if self.exits.contains(&to) {
            Some(MoveKind::Exit)
        } else if self.splits.contains(&to) {
            Some(MoveKind::Split)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
            && self.moves.is_empty()
            && self.exits.is_empty()
            && self.splits.is_empty()
    }
}

/// Compute every legal destination from `from` for `player`
pub fn legal_targets(board: &Board, from: Hex, player: Player) -> LegalTargets {
    if has_any_capture(board, player) {
        return LegalTargets {
            mandatory_capture: true,
            captures: capture_targets(board, from, player),
            ..LegalTargets::default()
        };
    }
    let splits = if board.height(from) > SPLIT_MIN_HEIGHT {
        split_targets(board, from)
    } else {
        Vec::new()
    };
    LegalTargets {
        mandatory_capture: false,
        captures: Vec::new(),
        moves: move_targets(board, from),
        exits: exit_targets(board, from, player),
        splits,
    }
}

/// Legal placement cells for the placement phase.
///
/// White's very first piece goes to the origin. Black's first piece is
/// legal only once the origin is occupied, and must sit next to it. All
/// later placements go on any empty inner cell adjacent to an occupied one.
pub fn valid_placements(
    board: &Board,
    occupied: &FxHashSet<Hex>,
    pieces_left: u8,
    player: Player,
) -> Vec<Hex> {
    if pieces_left == PIECES_PER_PLAYER {
        return match player {
            Player::White => vec![Hex::ORIGIN],
            Player::Black => {
                if occupied.contains(&Hex::ORIGIN) {
                    Hex::ORIGIN
                        .neighbors()
                        .into_iter()
                        .filter(|&n| n.is_inner() && board.is_empty_cell(n))
                        .collect()
                } else {
                    Vec::new()
                }
            }
        };
    }
    let mut seen = FxHashSet::default();
    let mut candidates = Vec::new();
    for &occ in occupied {
        for n in occ.neighbors() {
            if n.is_inner() && board.is_empty_cell(n) && seen.insert(n) {
                candidates.push(n);
            }
        }
    }
    candidates
}
