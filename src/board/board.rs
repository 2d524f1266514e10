//! Board structure: a flat 15x15 grid of stones plus move history.

use crate::types::{Cell, Side, Stone, TOTAL_CELLS};

/// Game board with a move stack for undo.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [Stone; TOTAL_CELLS],
    history: Vec<(Cell, Side)>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Stone::Empty; TOTAL_CELLS],
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Stone {
        self.cells[cell.index()]
    }

    #[inline]
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell) == Stone::Empty
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == TOTAL_CELLS
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Places `side`'s stone at `cell` and records it for undo. Callers are
    /// responsible for checking legality first (see
    /// [`crate::engine::Engine::make`]).
    pub fn place(&mut self, cell: Cell, side: Side) {
        self.cells[cell.index()] = Stone::from(side);
        self.history.push((cell, side));
    }

    /// Pops the most recent move, clearing its cell. Returns `None` if
    /// history is empty.
    pub fn pop(&mut self) -> Option<(Cell, Side)> {
        let (cell, side) = self.history.pop()?;
        self.cells[cell.index()] = Stone::Empty;
        Some((cell, side))
    }

    #[inline]
    pub fn last_move(&self) -> Option<Cell> {
        self.history.last().map(|&(cell, _)| cell)
    }

    #[inline]
    pub fn history(&self) -> &[(Cell, Side)] {
        &self.history
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
