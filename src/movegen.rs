//! Candidate-move generation scoped to the neighborhood of existing
//! stones, with per-direction partial scores maintained incrementally
//! across `make`/`undo`.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::board::Board;
use crate::eval::Evaluator;
use crate::line_model::LineModel;
use crate::types::{Cell, Direction, Stone};

/// A candidate's per-direction score arrays: one entry per
/// [`Direction::ALL`] index, for Black and for White.
type DirectionScores = ([i32; 4], [i32; 4]);

struct Snapshot {
    /// Cells newly added to the candidate set by this `make`.
    added: Vec<Cell>,
    /// Cells that already existed and had one direction slot rescored,
    /// paired with their prior full entry.
    updated: Vec<(Cell, DirectionScores)>,
    /// The played cell's own entry, removed from the set; restored on undo.
    removed_center: Option<(Cell, DirectionScores)>,
}

/// Maintains the set of cells worth considering as a next move: those
/// within a Chebyshev radius of 3 from any stone already on the board.
pub struct MoveGenerator {
    candidates: HashMap<Cell, DirectionScores>,
    undo_stack: Vec<Snapshot>,
}

const NEIGHBORHOOD_RADIUS: i32 = 3;
const RESCORE_RADIUS: i32 = 4;

impl MoveGenerator {
    pub fn new() -> Self {
        Self {
            candidates: HashMap::new(),
            undo_stack: Vec::new(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// The per-direction scores stored for `cell`, if it's a candidate.
    pub fn direction_scores(&self, cell: Cell) -> Option<DirectionScores> {
        self.candidates.get(&cell).copied()
    }

    /// Candidates with their black/white sums over the 4 directions.
    pub fn iter_candidates(&self) -> impl Iterator<Item = (Cell, i32, i32)> + '_ {
        self.candidates
            .iter()
            .map(|(&cell, (black, white))| (cell, black.iter().sum(), white.iter().sum()))
    }

    /// Expands the candidate set around `mv`, removes `mv` itself (now
    /// occupied), and rescores every remaining candidate collinear with
    /// `mv` within `RESCORE_RADIUS` along the direction they share with it.
    /// `board` and `lines` must already reflect `mv`'s placement.
    pub fn make(&mut self, mv: Cell, board: &Board, evaluator: &mut Evaluator, lines: &LineModel) {
        let mut added = Vec::new();

        for dy in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
            for dx in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (mv.x as i32 + dx, mv.y as i32 + dy);
                if !Cell::is_valid(nx, ny) {
                    continue;
                }
                let cell = Cell::new(nx as u8, ny as u8);
                if board.get(cell) != Stone::Empty {
                    continue;
                }
                if let Entry::Vacant(slot) = self.candidates.entry(cell) {
                    slot.insert(([0; 4], [0; 4]));
                    added.push(cell);
                }
            }
        }

        let removed_center = self.candidates.remove(&mv).map(|entry| (mv, entry));

        let mut updated: Vec<(Cell, DirectionScores)> = Vec::new();
        for (dir_idx, dir) in Direction::ALL.into_iter().enumerate() {
            let (vx, vy) = dir.vector();
            for step in (-RESCORE_RADIUS..=RESCORE_RADIUS).filter(|&s| s != 0) {
                let (nx, ny) = (mv.x as i32 + vx * step, mv.y as i32 + vy * step);
                if !Cell::is_valid(nx, ny) {
                    continue;
                }
                let cell = Cell::new(nx as u8, ny as u8);
                let Some(&entry) = self.candidates.get(&cell) else {
                    continue;
                };
                if !added.contains(&cell) && !updated.iter().any(|&(c, _)| c == cell) {
                    updated.push((cell, entry));
                }
                let (black, white) = evaluator.score_at(lines, cell, dir);
                let slot = self.candidates.get_mut(&cell).expect("just checked present");
                slot.0[dir_idx] = black;
                slot.1[dir_idx] = white;
            }
        }

        self.undo_stack.push(Snapshot {
            added,
            updated,
            removed_center,
        });
    }

    /// Restores the snapshot pushed by the matching `make(mv, ..)`.
    pub fn undo(&mut self, _mv: Cell) {
        let snapshot = self
            .undo_stack
            .pop()
            .expect("undo() called without a matching make()");

        for cell in snapshot.added {
            self.candidates.remove(&cell);
        }
        for (cell, entry) in snapshot.updated {
            self.candidates.insert(cell, entry);
        }
        if let Some((cell, entry)) = snapshot.removed_center {
            self.candidates.insert(cell, entry);
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn setup() -> (Board, LineModel, Evaluator, MoveGenerator) {
        (Board::new(), LineModel::new(), Evaluator::new(), MoveGenerator::new())
    }

    fn play(board: &mut Board, lines: &mut LineModel, eval: &mut Evaluator, gen: &mut MoveGenerator, cell: Cell, side: Side) {
        board.place(cell, side);
        lines.set(cell, Stone::from(side));
        eval.update(lines, cell);
        gen.make(cell, board, eval, lines);
    }

    fn unplay(board: &mut Board, lines: &mut LineModel, eval: &mut Evaluator, gen: &mut MoveGenerator) {
        let (cell, _side) = board.pop().expect("a move to undo");
        gen.undo(cell);
        eval.restore();
        lines.set(cell, Stone::Empty);
    }

    #[test]
    fn first_move_seeds_neighborhood_and_removes_itself() {
        let (mut board, mut lines, mut eval, mut gen) = setup();
        let center = Cell::new(7, 7);
        play(&mut board, &mut lines, &mut eval, &mut gen, center, Side::Black);

        assert!(gen.direction_scores(center).is_none());
        assert!(gen.direction_scores(Cell::new(7, 8)).is_some());
        assert!(gen.direction_scores(Cell::new(4, 7)).is_some());
        assert!(gen.direction_scores(Cell::new(3, 7)).is_none()); // outside radius 3
    }

    #[test]
    fn make_then_undo_restores_candidate_set() {
        let (mut board, mut lines, mut eval, mut gen) = setup();
        play(&mut board, &mut lines, &mut eval, &mut gen, Cell::new(7, 7), Side::Black);
        let before: Vec<_> = {
            let mut v: Vec<_> = gen.iter_candidates().collect();
            v.sort_by_key(|&(c, _, _)| c.index());
            v
        };

        play(&mut board, &mut lines, &mut eval, &mut gen, Cell::new(7, 8), Side::White);
        unplay(&mut board, &mut lines, &mut eval, &mut gen);

        let mut after: Vec<_> = gen.iter_candidates().collect();
        after.sort_by_key(|&(c, _, _)| c.index());
        assert_eq!(before, after);
    }

    #[test]
    fn empty_generator_reports_empty() {
        let gen = MoveGenerator::new();
        assert!(gen.is_empty());
    }
}
