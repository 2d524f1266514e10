//! A free-style Gomoku search engine.
//!
//! The board is 15x15; the win condition is an unbroken run of five
//! stones of one color in any of the four line directions (overlines
//! count). The engine is organized into several small modules:
//!
//! - [`types`]: board-independent primitives (`Cell`, `Side`, `Stone`, `Direction`).
//! - [`board`]: the raw 15x15 grid and move history.
//! - [`zobrist`]: incremental position hashing for the transposition table.
//! - [`line_model`]: the 72 row/column/diagonal line strings kept per side.
//! - [`pattern`]: Aho-Corasick shape scoring over line strings.
//! - [`eval`]: incremental marginal-gain scoring on top of the line model.
//! - [`movegen`]: neighborhood-scoped candidate generation and rescoring.
//! - [`search`]: PVS with null-move pruning, multi-cut, threat extension and VCF quiescence.
//! - [`engine`]: [`Engine`], the type that wires everything together.
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Engine, Side};
//!
//! let mut engine = Engine::new();
//! let mv = engine.best_move(Side::Black);
//! engine.make(mv, Side::Black).unwrap();
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod line_model;
pub mod movegen;
pub mod pattern;
pub mod search;
pub mod types;
pub mod zobrist;

pub use board::Board;
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use types::{Cell, Direction, Side, Status, Stone, BOARD_SIZE};
