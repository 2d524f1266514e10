//! The engine: a single type wiring Board, LineModel, Evaluator,
//! MoveGenerator, Zobrist and both transposition tables together, and
//! exposing the narrow interface a UI collaborator drives (`make`,
//! `best_move`, `status`, `undo`, `cell_at`).
//!
//! `make`/`undo` are the only mutators; they keep every subsystem in
//! lockstep so that `Board`, `LineModel`, `Evaluator`, `MoveGenerator`
//! and `Zobrist` never observe a partially-applied move.
//!
//! # Example
//!
//! ```
//! use gomoku::{Engine, Side};
//! use gomoku::types::Cell;
//!
//! let mut engine = Engine::new();
//! let mv = engine.best_move(Side::Black);
//! assert_eq!(mv, Cell::CENTER);
//! engine.make(mv, Side::Black).unwrap();
//! assert_eq!(engine.last_move(), Some(mv));
//! ```

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::eval::Evaluator;
use crate::line_model::LineModel;
use crate::movegen::MoveGenerator;
use crate::search::{self, SearchContext, TranspositionTable};
use crate::types::{Cell, Direction, Side, Status, Stone, BOARD_SIZE};
use crate::zobrist::Zobrist;

/// Integrates every subsystem behind the interface described in
/// `spec.md` §6. Board/line/eval/generator/zobrist state is created once
/// per instance and lives for the engine's whole lifetime; the search
/// itself keeps no persistent state of its own beyond the transposition
/// tables owned here.
pub struct Engine {
    board: Board,
    lines: LineModel,
    evaluator: Evaluator,
    generator: MoveGenerator,
    zobrist: Zobrist,
    tt: TranspositionTable,
    vcf_tt: TranspositionTable,
    config: EngineConfig,
}

impl Engine {
    /// A fresh engine with an empty board, using [`EngineConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            board: Board::new(),
            lines: LineModel::new(),
            evaluator: Evaluator::new(),
            generator: MoveGenerator::new(),
            zobrist: Zobrist::new(),
            tt: TranspositionTable::new(config.tt_size_mb),
            vcf_tt: TranspositionTable::new(config.vcf_tt_size_mb),
            config,
        }
    }

    /// Static bounds check: `0 <= x, y < 15`. Doesn't consider occupancy.
    #[must_use]
    pub fn is_legal(cell: Cell) -> bool {
        (cell.x as usize) < BOARD_SIZE && (cell.y as usize) < BOARD_SIZE
    }

    /// Plays `side`'s stone at `cell`, updating Board, LineModel,
    /// Evaluator, MoveGenerator and Zobrist atomically. Fails if `cell`
    /// is occupied or out of range.
    pub fn make(&mut self, cell: Cell, side: Side) -> Result<(), EngineError> {
        if !Self::is_legal(cell) || !self.board.is_empty(cell) {
            return Err(EngineError::IllegalMove { cell });
        }
        self.ctx().make(cell, side);
        Ok(())
    }

    /// Restores state to before the last `steps` `make`s.
    pub fn undo(&mut self, steps: usize) -> Result<(), EngineError> {
        let available = self.board.move_count();
        if steps > available {
            return Err(EngineError::UnderflowUndo { requested: steps, available });
        }
        let mut ctx = self.ctx();
        for _ in 0..steps {
            ctx.undo();
        }
        Ok(())
    }

    #[must_use]
    pub fn cell_at(&self, cell: Cell) -> Stone {
        self.board.get(cell)
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Cell> {
        self.board.last_move()
    }

    /// Checks the 4 directions through `mv` for a run of `side`'s stones
    /// of length >= 5, then falls back to board-full for a draw.
    #[must_use]
    pub fn status(&self, mv: Cell, side: Side) -> Status {
        if self.longest_run_through(mv, side) >= 5 {
            return Status::Win;
        }
        if self.board.is_full() {
            return Status::Draw;
        }
        Status::Undecided
    }

    fn longest_run_through(&self, mv: Cell, side: Side) -> usize {
        let stone = Stone::from(side);
        let mut best = 1;
        for dir in Direction::ALL {
            let (dx, dy) = dir.vector();
            let run = 1 + self.run_in_direction(mv, stone, dx, dy) + self.run_in_direction(mv, stone, -dx, -dy);
            best = best.max(run);
        }
        best
    }

    fn run_in_direction(&self, from: Cell, stone: Stone, dx: i32, dy: i32) -> usize {
        let mut count = 0;
        let (mut x, mut y) = (from.x as i32 + dx, from.y as i32 + dy);
        while Cell::is_valid(x, y) && self.board.get(Cell::new(x as u8, y as u8)) == stone {
            count += 1;
            x += dx;
            y += dy;
        }
        count
    }

    /// Returns the best move for `side`. Always opens on the center; for
    /// every later position, runs iterative-deepening PVS up to
    /// `config.limit_depth`.
    ///
    /// Precondition: the game is not already won (`evaluate(side) < Five`
    /// and `evaluate(opponent) < Five`) — behavior is otherwise
    /// unspecified, per `spec.md` §8.
    pub fn best_move(&mut self, side: Side) -> Cell {
        if self.board.is_board_empty() {
            return Cell::CENTER;
        }
        let mut ctx = self.ctx();
        search::root_search(&mut ctx, side).unwrap_or(Cell::CENTER)
    }

    fn ctx(&mut self) -> SearchContext<'_> {
        SearchContext {
            board: &mut self.board,
            lines: &mut self.lines,
            evaluator: &mut self.evaluator,
            generator: &mut self.generator,
            zobrist: &mut self.zobrist,
            tt: &mut self.tt,
            vcf_tt: &mut self.vcf_tt,
            limit_depth: self.config.limit_depth,
            vcf_depth: self.config.vcf_depth,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
