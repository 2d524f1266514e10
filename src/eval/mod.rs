//! Per-line shape-score evaluation, incrementally maintained across
//! `make`/`undo` and cached by line-window content.

mod cache;

use cache::LruCache;

use crate::line_model::{locate, LineModel, NUM_LINES};
use crate::pattern;
use crate::types::{Cell, Direction, Side};

const SHAPE_CACHE_CAPACITY: usize = 1 << 16;
const FOUR_CACHE_CAPACITY: usize = 1 << 16;

/// What an `update` changed, so `restore` can undo it exactly.
struct Snapshot {
    /// `(line_index, prior_black_score, prior_white_score)` for each of the
    /// (up to four) lines touched by the move.
    deltas: Vec<(usize, i32, i32)>,
    prior_totals: [i32; 2],
}

/// Tracks each side's total score as the sum of 72 per-line shape scores.
pub struct Evaluator {
    per_line: [[i32; NUM_LINES]; 2],
    totals: [i32; 2],
    shape_cache: LruCache<i32>,
    four_cache: LruCache<bool>,
    undo_stack: Vec<Snapshot>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            per_line: [[0; NUM_LINES]; 2],
            totals: [0; 2],
            shape_cache: LruCache::with_capacity(SHAPE_CACHE_CAPACITY),
            four_cache: LruCache::with_capacity(FOUR_CACHE_CAPACITY),
            undo_stack: Vec::new(),
        }
    }

    /// Recomputes the score of every line touched by a real placement (or
    /// removal) at `cell`. Must be called after `lines` already reflects
    /// the mutation.
    pub fn update(&mut self, lines: &LineModel, cell: Cell) {
        let prior_totals = self.totals;
        let mut deltas = Vec::with_capacity(4);

        for dir in Direction::ALL {
            let Some((idx, _offset)) = locate(cell, dir) else {
                continue;
            };
            let prior_black = self.per_line[0][idx];
            let prior_white = self.per_line[1][idx];
            deltas.push((idx, prior_black, prior_white));

            let black_line = lines.line(Side::Black, idx).to_vec();
            let white_line = lines.line(Side::White, idx).to_vec();
            let new_black = self.shape_cache.get_or_insert_with(&black_line, |s| pattern::score_line(s));
            let new_white = self.shape_cache.get_or_insert_with(&white_line, |s| pattern::score_line(s));

            self.per_line[0][idx] = new_black;
            self.per_line[1][idx] = new_white;
            self.totals[0] += new_black - prior_black;
            self.totals[1] += new_white - prior_white;
        }

        self.undo_stack.push(Snapshot { deltas, prior_totals });
    }

    /// Pops the last `update`'s snapshot, restoring both sides' per-line
    /// scores and totals.
    pub fn restore(&mut self) {
        let snapshot = self
            .undo_stack
            .pop()
            .expect("restore() called without a matching update()");
        for (idx, black, white) in snapshot.deltas {
            self.per_line[0][idx] = black;
            self.per_line[1][idx] = white;
        }
        self.totals = snapshot.prior_totals;
    }

    #[inline]
    pub fn evaluate(&self, side: Side) -> i32 {
        self.totals[side.index()]
    }

    /// Whether `totals` currently equals the sum of `per_line`, for both
    /// sides. Exposed crate-wide (but only ever called from tests) so
    /// cross-module property tests can assert the invariant from `search`.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        (0..2).all(|s| self.per_line[s].iter().sum::<i32>() == self.totals[s])
    }

    /// Score each side would gain from a hypothetical stone at `cell`
    /// along `dir`, without mutating any real state. Builds a <=9-char
    /// window centered on the offset (clipped at line boundaries), scores
    /// it as-is and with the center byte set to the "own stone" marker,
    /// and returns the difference — the marginal gain from the
    /// hypothetical placement, for each side's point of view.
    pub fn score_at(&mut self, lines: &LineModel, cell: Cell, dir: Direction) -> (i32, i32) {
        let Some((black_window, center)) = lines.window(cell, dir, Side::Black, 4) else {
            return (0, 0);
        };
        let (white_window, _) = lines
            .window(cell, dir, Side::White, 4)
            .expect("both POVs share validity for a given direction");

        let black_score = self.marginal_gain(&black_window, center);
        let white_score = self.marginal_gain(&white_window, center);
        (black_score, white_score)
    }

    fn marginal_gain(&mut self, window: &[u8], center: usize) -> i32 {
        let before = self.shape_cache.get_or_insert_with(window, |s| pattern::score_line(s));
        let mut after = window.to_vec();
        after[center] = b'1';
        let after = self.shape_cache.get_or_insert_with(&after, |s| pattern::score_line(s));
        after - before
    }

    /// Whether placing `side` at `cell` creates at least one Four pattern
    /// in any of the four directions that wasn't already there.
    pub fn is_four(&mut self, lines: &LineModel, cell: Cell, side: Side) -> bool {
        for dir in Direction::ALL {
            let Some((window, center)) = lines.window(cell, dir, side, 4) else {
                continue;
            };
            let before = self.four_cache.get_or_insert_with(&window, |w| pattern::find_fours(w));
            let mut after = window.clone();
            after[center] = b'1';
            let after = self.four_cache.get_or_insert_with(&after, |w| pattern::find_fours(w));
            if after && !before {
                return true;
            }
        }
        false
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stone;

    fn per_line_sum_matches_total(eval: &Evaluator) {
        for side in [Side::Black, Side::White] {
            let sum: i32 = eval.per_line[side.index()].iter().sum();
            assert_eq!(sum, eval.totals[side.index()]);
        }
    }

    #[test]
    fn fresh_evaluator_is_all_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(Side::Black), 0);
        assert_eq!(eval.evaluate(Side::White), 0);
    }

    #[test]
    fn update_then_restore_is_byte_identical() {
        let mut lines = LineModel::new();
        let mut eval = Evaluator::new();
        let before_totals = eval.totals;
        let before_per_line = eval.per_line;

        let cell = Cell::new(7, 7);
        lines.set(cell, Stone::Black);
        eval.update(&lines, cell);
        assert_ne!(eval.totals, before_totals);

        eval.restore();
        assert_eq!(eval.totals, before_totals);
        assert_eq!(eval.per_line, before_per_line);
    }

    #[test]
    fn totals_always_equal_sum_of_per_line_scores() {
        let mut lines = LineModel::new();
        let mut eval = Evaluator::new();
        let placements = [
            (Cell::new(7, 7), Side::Black),
            (Cell::new(7, 8), Side::White),
            (Cell::new(8, 8), Side::Black),
            (Cell::new(6, 9), Side::White),
            (Cell::new(6, 6), Side::Black),
        ];
        for &(cell, side) in &placements {
            lines.set(cell, Stone::from(side));
            eval.update(&lines, cell);
            per_line_sum_matches_total(&eval);
        }
    }

    #[test]
    fn five_in_a_row_scores_five() {
        let mut lines = LineModel::new();
        let mut eval = Evaluator::new();
        for x in 3..8u8 {
            let cell = Cell::new(x, 7);
            lines.set(cell, Stone::Black);
            eval.update(&lines, cell);
        }
        assert!(eval.evaluate(Side::Black) >= pattern::FIVE);
    }

    #[test]
    fn score_at_on_empty_cell_matches_hypothetical_placement() {
        let mut lines = LineModel::new();
        let mut eval = Evaluator::new();
        // three black stones in a row, empty cell at the end
        for x in 3..6u8 {
            let cell = Cell::new(x, 7);
            lines.set(cell, Stone::Black);
            eval.update(&lines, cell);
        }
        let target = Cell::new(6, 7);
        let (black_gain, _white_gain) = eval.score_at(&lines, target, Direction::Row);

        // actually place it and compare the line's new score against the old one
        let (row_idx, _) = locate(target, Direction::Row).unwrap();
        let old_black_line_score = eval.per_line[0][row_idx];
        lines.set(target, Stone::Black);
        eval.update(&lines, target);
        let new_black_line_score = eval.per_line[0][row_idx];

        assert_eq!(black_gain, new_black_line_score - old_black_line_score);
    }

    #[test]
    fn is_four_detects_a_simple_four_completion() {
        let mut lines = LineModel::new();
        let mut eval = Evaluator::new();
        for x in 3..6u8 {
            let cell = Cell::new(x, 7);
            lines.set(cell, Stone::Black);
            eval.update(&lines, cell);
        }
        assert!(eval.is_four(&lines, Cell::new(6, 7), Side::Black));
        assert!(!eval.is_four(&lines, Cell::new(2, 8), Side::Black));
    }
}
