//! STAXXIT Core - Rules engine for the hex stack game
//!
//! This crate provides the game logic for STAXXIT:
//! - Hex geometry (radius-5 inner board, radius-6 exit ring)
//! - Stack-based board model
//! - Capture / move / exit / split generation with mandatory capture
//! - Match state machine (placing -> playing -> ended)
//! - Termination evaluation with stack-count / piece-count tie-breaks

pub mod board;
pub mod game;
pub mod hex;
pub mod rules;
pub mod score;

// Re-exports for convenient access
pub use board::{Board, Stack};
pub use game::{
    Action, Applied, LastAction, MatchSnapshot, MatchState, Phase, Player, PIECES_PER_PLAYER,
};
pub use hex::{
    outer_colors, outer_ring, Hex, OuterColor, OuterColors, ParseHexError, DIRECTIONS, DUAL_CELLS,
    INNER_RADIUS, OUTER_RADIUS,
};
pub use rules::{legal_targets, valid_placements, LegalTargets, MoveKind, SPLIT_MIN_HEIGHT};
pub use score::{terminal_outcome, Outcome};
