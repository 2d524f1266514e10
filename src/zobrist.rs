//! Zobrist hashing for position identification.
//!
//! Allows O(1) incremental hash updates when placing or removing a stone,
//! which is essential for keying the transposition table during search.
//!
//! # Example
//!
//! ```
//! use gomoku::types::{Cell, Side};
//! use gomoku::zobrist::Zobrist;
//!
//! let mut z = Zobrist::new();
//! let initial = z.hash();
//!
//! z.toggle(Cell::new(7, 7), Side::Black);
//! assert_ne!(z.hash(), initial);
//!
//! // the matching toggle is its own inverse
//! z.toggle(Cell::new(7, 7), Side::Black);
//! assert_eq!(z.hash(), initial);
//! ```

use rand::Rng;

use crate::types::{Cell, Side, TOTAL_CELLS};

/// Per-cell, per-side random table plus a running XOR accumulator.
pub struct Zobrist {
    table: [[u64; 2]; TOTAL_CELLS],
    hash: u64,
}

impl Zobrist {
    /// Builds a fresh table from a nondeterministic seed: every process
    /// gets a different random table, so hashes are not reproducible
    /// across runs (only within one).
    pub fn new() -> Self {
        let mut rng = rand::rng();
        let mut table = [[0u64; 2]; TOTAL_CELLS];
        for slot in table.iter_mut() {
            slot[0] = rng.random();
            slot[1] = rng.random();
        }
        Self { table, hash: 0 }
    }

    /// XORs `side`'s random value for `cell` into the accumulator. Calling
    /// this twice with the same arguments restores the previous hash.
    #[inline]
    pub fn toggle(&mut self, cell: Cell, side: Side) {
        self.hash ^= self.table[cell.index()][side.index()];
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl Default for Zobrist {
    fn default() -> Self {
        Self::new()
    }
}
