//! Hex board geometry with axial coordinates
//!
//! The board is a hexagon of radius 6 around the origin: cells at cube
//! distance <= 5 form the inner (playable) region, the 36 cells at exactly
//! distance 6 form the exit ring. Anything further out is off-board.

use crate::game::Player;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Radius of the inner playable region
pub const INNER_RADIUS: i8 = 5;

/// Radius of the exit ring
pub const OUTER_RADIUS: i8 = 6;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

/// Direction vectors in axial coordinates (dq, dr)
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    pub const ORIGIN: Hex = Hex::new(0, 0);

    /// Cube distance from the center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        self.q.abs().max(self.r.abs()).max((self.q + self.r).abs())
    }

    /// Cube distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        dq.max(dr).max(ds)
    }

    /// Inner (playable) region: distance <= 5
    pub fn is_inner(&self) -> bool {
        self.distance_to_center() <= INNER_RADIUS
    }

    /// Exit ring: distance exactly 6
    pub fn is_outer(&self) -> bool {
        self.distance_to_center() == OUTER_RADIUS
    }

    /// Inner region or exit ring
    pub fn is_on_board(&self) -> bool {
        self.distance_to_center() <= OUTER_RADIUS
    }

    /// The cell `steps` hexes away along a direction vector
    pub fn offset(&self, dir: (i8, i8), steps: i8) -> Hex {
        Hex::new(self.q + steps * dir.0, self.r + steps * dir.1)
    }

    /// Adjacent on-board cells (up to six)
    pub fn neighbors(&self) -> Vec<Hex> {
        DIRECTIONS
            .iter()
            .map(|&dir| self.offset(dir, 1))
            .filter(Hex::is_on_board)
            .collect()
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Error parsing a `"q,r"` coordinate string
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid hex coordinate: {0:?}")]
pub struct ParseHexError(String);

impl FromStr for Hex {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s.split_once(',').ok_or_else(|| ParseHexError(s.to_string()))?;
        let q = q.trim().parse().map_err(|_| ParseHexError(s.to_string()))?;
        let r = r.trim().parse().map_err(|_| ParseHexError(s.to_string()))?;
        Ok(Hex::new(q, r))
    }
}

// ============================================================================
// OUTER RING COLORS
// ============================================================================

/// Color label of an exit-ring cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OuterColor {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "both")]
    Both,
}

impl OuterColor {
    /// Whether a player's stacks may exit onto a cell with this label
    pub fn accepts(self, player: Player) -> bool {
        match self {
            OuterColor::White => player == Player::White,
            OuterColor::Black => player == Player::Black,
            OuterColor::Both => true,
        }
    }
}

/// The six corner cells of the exit ring, which accept either color
pub const DUAL_CELLS: [Hex; 6] = [
    Hex::new(6, 0),
    Hex::new(0, 6),
    Hex::new(-6, 6),
    Hex::new(0, -6),
    Hex::new(6, -6),
    Hex::new(-6, 0),
];

/// Immutable color assignment for the 36 exit-ring cells
pub struct OuterColors {
    colors: FxHashMap<Hex, OuterColor>,
}

impl OuterColors {
    /// Walk the ring in angular order from (6,0), alternating W/B.
    /// Dual corner cells are labeled `Both` and do not advance the toggle.
    fn compute() -> Self {
        let mut colors = FxHashMap::default();
        let mut toggle = Player::White;
        for hex in angular_ring() {
            if DUAL_CELLS.contains(&hex) {
                colors.insert(hex, OuterColor::Both);
            } else {
                let color = match toggle {
                    Player::White => OuterColor::White,
                    Player::Black => OuterColor::Black,
                };
                colors.insert(hex, color);
                toggle = toggle.opponent();
            }
        }
        Self { colors }
    }

    pub fn get(&self, hex: Hex) -> Option<OuterColor> {
        self.colors.get(&hex).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Hex, OuterColor)> + '_ {
        self.colors.iter().map(|(&hex, &color)| (hex, color))
    }
}

/// Process-wide exit-ring color table, computed on first use
pub fn outer_colors() -> &'static OuterColors {
    static TABLE: OnceLock<OuterColors> = OnceLock::new();
    TABLE.get_or_init(OuterColors::compute)
}

/// All 36 exit-ring cells
pub fn outer_ring() -> Vec<Hex> {
    let mut ring = Vec::with_capacity(36);
    for q in -OUTER_RADIUS..=OUTER_RADIUS {
        for r in -OUTER_RADIUS..=OUTER_RADIUS {
            let hex = Hex::new(q, r);
            if hex.is_outer() {
                ring.push(hex);
            }
        }
    }
    ring
}

/// The exit ring sorted by polar angle, rotated to start at (6,0)
pub(crate) fn angular_ring() -> Vec<Hex> {
    let mut ring = outer_ring();
    ring.sort_by(|a, b| polar_angle(*a).total_cmp(&polar_angle(*b)));
    let start = ring.iter().position(|&h| h == Hex::new(6, 0)).unwrap_or(0);
    ring.rotate_left(start);
    ring
}

/// Angle of a hex around the origin in pointy-top pixel coordinates
fn polar_angle(hex: Hex) -> f64 {
    let x = 3f64.sqrt() * hex.q as f64 + (3f64.sqrt() / 2.0) * hex.r as f64;
    let y = 1.5 * hex.r as f64;
    y.atan2(x)
}
