//! Board geometry endpoint
//!
//! Constant, process-wide data: the inner cells, the six direction
//! vectors, and the exit-ring color table. Clients fetch this once; it is
//! not repeated in per-match snapshots.

use axum::Json;
use serde::Serialize;
use staxxit_core::{outer_colors, Hex, OuterColor, DIRECTIONS, INNER_RADIUS, OUTER_RADIUS};

#[derive(Serialize)]
pub struct OuterCell {
    pub pos: Hex,
    pub color: OuterColor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInfo {
    pub inner_radius: i8,
    pub outer_radius: i8,
    pub inner_cells: Vec<Hex>,
    pub directions: Vec<[i8; 2]>,
    pub outer_colors: Vec<OuterCell>,
}

/// All cells of the inner playable region
fn inner_cells() -> Vec<Hex> {
    let mut cells = Vec::new();
    for q in -INNER_RADIUS..=INNER_RADIUS {
        for r in -INNER_RADIUS..=INNER_RADIUS {
            let hex = Hex::new(q, r);
            if hex.is_inner() {
                cells.push(hex);
            }
        }
    }
    cells
}

/// Get board geometry and the exit-ring color table
pub async fn get_board() -> Json<BoardInfo> {
    let mut ring: Vec<OuterCell> = outer_colors()
        .iter()
        .map(|(pos, color)| OuterCell { pos, color })
        .collect();
    ring.sort_by_key(|cell| cell.pos);

    Json(BoardInfo {
        inner_radius: INNER_RADIUS,
        outer_radius: OUTER_RADIUS,
        inner_cells: inner_cells(),
        directions: DIRECTIONS.iter().map(|&(q, r)| [q, r]).collect(),
        outer_colors: ring,
    })
}
