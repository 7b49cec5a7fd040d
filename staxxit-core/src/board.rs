//! Stack-based board model
//!
//! The board maps occupied cells to stacks of owner tokens, bottom to top.
//! An absent cell is an empty cell; a stack on the board is never empty.
//! The top token controls the stack, and the stack height gates movement
//! reach and split eligibility.

use crate::game::Player;
use crate::hex::Hex;
use rustc_hash::FxHashMap;

/// Ordered owner tokens, bottom to top
pub type Stack = Vec<Player>;

/// Sparse board: only occupied inner and exit-ring cells are present
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: FxHashMap<Hex, Stack>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack at a cell, if occupied
    pub fn stack(&self, hex: Hex) -> Option<&Stack> {
        self.cells.get(&hex)
    }

    /// Stack height; 0 for an empty cell
    pub fn height(&self, hex: Hex) -> usize {
        self.cells.get(&hex).map_or(0, Vec::len)
    }

    /// Controlling player (top token), if the cell is occupied
    pub fn owner(&self, hex: Hex) -> Option<Player> {
        self.cells.get(&hex).and_then(|stack| stack.last().copied())
    }

    pub fn is_empty_cell(&self, hex: Hex) -> bool {
        !self.cells.contains_key(&hex)
    }

    /// Iterate occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (Hex, &Stack)> + '_ {
        self.cells.iter().map(|(&hex, stack)| (hex, stack))
    }

    /// Insert a singleton stack (placement phase)
    pub(crate) fn place(&mut self, hex: Hex, player: Player) {
        debug_assert!(self.is_empty_cell(hex), "placement on occupied cell");
        self.cells.insert(hex, vec![player]);
    }

    /// Move a whole stack to an empty cell
    pub(crate) fn relocate(&mut self, from: Hex, to: Hex) {
        let Some(stack) = self.cells.remove(&from) else {
            debug_assert!(false, "relocate from empty origin");
            return;
        };
        self.cells.insert(to, stack);
    }

    /// Capture: the moving stack lands on top of the destination stack
    pub(crate) fn capture_merge(&mut self, from: Hex, to: Hex) {
        let Some(moving) = self.cells.remove(&from) else {
            debug_assert!(false, "capture from empty origin");
            return;
        };
        self.cells.entry(to).or_default().extend(moving);
    }

    /// Split: peel `top_count` tokens off the top to `to`, remainder stays
    pub(crate) fn split_peel(&mut self, from: Hex, to: Hex, top_count: usize) {
        let Some(stack) = self.cells.get_mut(&from) else {
            debug_assert!(false, "split from empty origin");
            return;
        };
        debug_assert!(top_count >= 1 && top_count < stack.len(), "bad split partition");
        if top_count < 1 || top_count >= stack.len() {
            return;
        }
        let moved = stack.split_off(stack.len() - top_count);
        self.cells.insert(to, moved);
    }
}
