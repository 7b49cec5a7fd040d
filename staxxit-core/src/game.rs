//! Match state machine
//!
//! Owns one match: phase, turn, remaining pieces, the board, and the last
//! applied action. `apply_action` is a pure function of the current state;
//! an illegal or stale action yields `None` with no other effect, which is
//! all the coordinator needs to decline it silently.

use crate::board::{Board, Stack};
use crate::hex::Hex;
use crate::rules::{self, MoveKind};
use crate::score::{self, Outcome};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Pieces each side places before the play phase begins
pub const PIECES_PER_PLAYER: u8 = 18;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "B")]
    Black,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }
}

/// Match phase; `Ended` is terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Placing,
    Playing,
    Ended,
}

/// An action as submitted by a player.
///
/// `move-or-capture` carries only the endpoints; the engine resolves
/// whether it is a capture, an inner move, or an exit from the geometry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    Place { pos: Hex },
    MoveOrCapture { from: Hex, to: Hex },
    #[serde(rename_all = "camelCase")]
    Split { from: Hex, to: Hex, top_count: usize },
}

/// The most recently applied action, annotated with its resolved kind
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LastAction {
    Place { player: Player, pos: Hex },
    Move { player: Player, from: Hex, to: Hex },
    Capture { player: Player, from: Hex, to: Hex },
    Exit { player: Player, from: Hex, to: Hex },
    #[serde(rename_all = "camelCase")]
    Split { player: Player, from: Hex, to: Hex, top_count: usize },
}

/// Result of an accepted action
#[derive(Clone, Debug)]
pub struct Applied {
    pub state: MatchState,
    /// Present only when the action ended the match
    pub outcome: Option<Outcome>,
}

/// One match, from placement through play to a win determination
#[derive(Clone, Debug)]
pub struct MatchState {
    board: Board,
    phase: Phase,
    current_player: Player,
    pieces_left: [u8; 2],
    occupied: FxHashSet<Hex>,
    last_action: Option<LastAction>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh match: empty board, placement phase, White to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Placing,
            current_player: Player::White,
            pieces_left: [PIECES_PER_PLAYER; 2],
            occupied: FxHashSet::default(),
            last_action: None,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn pieces_left(&self, player: Player) -> u8 {
        self.pieces_left[player.index()]
    }

    pub fn last_action(&self) -> Option<&LastAction> {
        self.last_action.as_ref()
    }

    /// Legal placement cells for the player to move
    pub fn valid_placements(&self) -> Vec<Hex> {
        if self.phase != Phase::Placing {
            return Vec::new();
        }
        rules::valid_placements(
            &self.board,
            &self.occupied,
            self.pieces_left(self.current_player),
            self.current_player,
        )
    }

    /// Legal destinations from `from` for the player to move
    pub fn legal_targets(&self, from: Hex) -> rules::LegalTargets {
        if self.phase != Phase::Playing || self.board.owner(from) != Some(self.current_player) {
            return rules::LegalTargets::default();
        }
        rules::legal_targets(&self.board, from, self.current_player)
    }

    // ========================================================================
    // APPLY ACTION
    // ========================================================================

    /// Validate and apply one action, returning the successor state.
    /// `None` means the action was declined; nothing changed.
    pub fn apply_action(&self, player: Player, action: &Action) -> Option<Applied> {
        if player != self.current_player {
            return None;
        }
        match (self.phase, action) {
            (Phase::Placing, Action::Place { pos }) => self.apply_place(player, *pos),
            (Phase::Playing, Action::MoveOrCapture { from, to }) => {
                self.apply_move(player, *from, *to)
            }
            (Phase::Playing, Action::Split { from, to, top_count }) => {
                self.apply_split(player, *from, *to, *top_count)
            }
            _ => None,
        }
    }

    fn apply_place(&self, player: Player, pos: Hex) -> Option<Applied> {
        let left = self.pieces_left(player);
        if left == 0 {
            debug_assert!(false, "placement with no pieces left");
            return None;
        }
        if !rules::valid_placements(&self.board, &self.occupied, left, player).contains(&pos) {
            return None;
        }

        let mut next = self.clone();
        next.board.place(pos, player);
        next.occupied.insert(pos);
        next.pieces_left[player.index()] -= 1;
        if next.pieces_left == [0, 0] {
            next.phase = Phase::Playing;
        }
        next.last_action = Some(LastAction::Place { player, pos });
        next.current_player = player.opponent();
        Some(Applied { state: next, outcome: None })
    }

    fn apply_move(&self, player: Player, from: Hex, to: Hex) -> Option<Applied> {
        if !from.is_inner() || self.board.owner(from) != Some(player) {
            return None;
        }
        let targets = rules::legal_targets(&self.board, from, player);
        let mut next = self.clone();
        let last = match targets.classify(to)? {
            MoveKind::Capture => {
                next.board.capture_merge(from, to);
                LastAction::Capture { player, from, to }
            }
            MoveKind::Move => {
                next.board.relocate(from, to);
                LastAction::Move { player, from, to }
            }
            MoveKind::Exit => {
                next.board.relocate(from, to);
                LastAction::Exit { player, from, to }
            }
            // Splits carry a partition size; they arrive as Action::Split
            MoveKind::Split => return None,
        };
        Self::finish_play(next, player, last)
    }

    fn apply_split(&self, player: Player, from: Hex, to: Hex, top_count: usize) -> Option<Applied> {
        if !from.is_inner() || self.board.owner(from) != Some(player) {
            return None;
        }
        let targets = rules::legal_targets(&self.board, from, player);
        if !targets.splits.contains(&to) {
            return None;
        }
        let h = self.board.height(from);
        if top_count < 1 || top_count >= h {
            return None;
        }

        let mut next = self.clone();
        next.board.split_peel(from, to, top_count);
        next.occupied.insert(to);
        Self::finish_play(next, player, LastAction::Split { player, from, to, top_count })
    }

    /// Record the action, flip the turn, and check for termination
    fn finish_play(mut next: MatchState, player: Player, last: LastAction) -> Option<Applied> {
        next.last_action = Some(last);
        next.current_player = player.opponent();
        let outcome = score::terminal_outcome(&next.board);
        if outcome.is_some() {
            next.phase = Phase::Ended;
        }
        Some(Applied { state: next, outcome })
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Plain serializable view of the match for transport
    pub fn snapshot(&self) -> MatchSnapshot {
        let mut cells: Vec<CellSnapshot> = self
            .board
            .cells()
            .map(|(pos, stack)| CellSnapshot { pos, stack: stack.clone() })
            .collect();
        cells.sort_by_key(|c| c.pos);
        let mut occupied: Vec<Hex> = self.occupied.iter().copied().collect();
        occupied.sort();
        MatchSnapshot {
            phase: self.phase,
            current_player: self.current_player,
            pieces_left: PiecesLeft {
                white: self.pieces_left[0],
                black: self.pieces_left[1],
            },
            cells,
            occupied,
            last_action: self.last_action.clone(),
        }
    }
}

/// One occupied cell in a snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub pos: Hex,
    pub stack: Stack,
}

/// Remaining unplaced pieces per player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecesLeft {
    #[serde(rename = "W")]
    pub white: u8,
    #[serde(rename = "B")]
    pub black: u8,
}

/// Transport view of a match; cells and occupied are sorted by coordinate
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub current_player: Player,
    pub pieces_left: PiecesLeft,
    pub cells: Vec<CellSnapshot>,
    pub occupied: Vec<Hex>,
    pub last_action: Option<LastAction>,
}
