//! Error taxonomy for the engine's public, fallible entry points.
//!
//! Internally the search never produces an error: a cutoff is just a
//! `return`, and cache misses are handled by recomputing. Only the two
//! precondition violations a caller can trigger at the boundary — an
//! illegal `make` and an `undo` past the start of history — surface here.

use crate::types::Cell;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("illegal move at {cell:?}: cell is occupied or out of range")]
    IllegalMove { cell: Cell },

    #[error("cannot undo {requested} move(s), only {available} available")]
    UnderflowUndo { requested: usize, available: usize },
}
