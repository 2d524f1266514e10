//! Incrementally maintained per-direction "line strings".
//!
//! The board is decomposed into 72 lines: 15 rows, 15 columns, 21 `/`
//! diagonals and 21 `\` diagonals. Each line is kept as two character
//! strings — one from Black's point of view, one from White's — where
//! `'0'` is empty, `'1'` is the viewing side's stone and `'2'` is the
//! opponent's. This is the representation the pattern matcher scores.

use crate::types::{Cell, Direction, Side};

pub const NUM_LINES: usize = 72;

/// Length of line `idx`, derived from the same offset formulas used by
/// [`locate`].
fn line_length(idx: usize) -> usize {
    match idx {
        0..=14 => 15,
        15..=29 => 15,
        30..=50 => 15 - (idx as i32 - 40).unsigned_abs() as usize,
        51..=71 => {
            let sum = idx as i32 - 47; // x + y at this diagonal
            if sum <= 14 {
                (sum + 1) as usize
            } else {
                (29 - sum) as usize
            }
        }
        _ => unreachable!("line index out of range: {idx}"),
    }
}

/// Maps a cell and direction to `(line_index, offset_within_line)`.
/// Returns `None` when `cell` doesn't lie on a valid diagonal for
/// [`Direction::DiagUp`] / [`Direction::DiagDown`] (rows and columns are
/// always valid).
pub fn locate(cell: Cell, dir: Direction) -> Option<(usize, usize)> {
    let x = cell.x as i32;
    let y = cell.y as i32;
    match dir {
        Direction::Row => Some((y as usize, x as usize)),
        Direction::Col => Some((15 + x as usize, y as usize)),
        Direction::DiagUp => {
            let diff = y - x;
            if diff.abs() > 10 {
                return None;
            }
            let idx = (diff + 40) as usize;
            Some((idx, x.min(y) as usize))
        }
        Direction::DiagDown => {
            let sum = x + y;
            if !(4..=24).contains(&sum) {
                return None;
            }
            let idx = (sum + 47) as usize;
            Some((idx, y.min(14 - x) as usize))
        }
    }
}

/// The 72 direction-lines, kept from both sides' points of view.
#[derive(Clone)]
pub struct LineModel {
    views: [[Vec<u8>; NUM_LINES]; 2],
}

impl LineModel {
    pub fn new() -> Self {
        let build = || -> [Vec<u8>; NUM_LINES] { std::array::from_fn(|i| vec![b'0'; line_length(i)]) };
        Self {
            views: [build(), build()],
        }
    }

    /// The current byte string for `side`'s point of view of line `idx`.
    #[inline]
    pub fn line(&self, side: Side, idx: usize) -> &[u8] {
        &self.views[side.index()][idx]
    }

    /// Records a real placement (or its removal, via `Stone::Empty`) in all
    /// lines touching `cell`. Must be called exactly once per `Board`
    /// mutation, in lockstep with it.
    pub fn set(&mut self, cell: Cell, stone: crate::types::Stone) {
        use crate::types::Stone;
        let (black_byte, white_byte) = match stone {
            Stone::Empty => (b'0', b'0'),
            Stone::Black => (b'1', b'2'),
            Stone::White => (b'2', b'1'),
        };
        for dir in Direction::ALL {
            if let Some((idx, offset)) = locate(cell, dir) {
                self.views[0][idx][offset] = black_byte;
                self.views[1][idx][offset] = white_byte;
            }
        }
    }

    /// Builds the clipped window (at most 9 chars) centered on `cell` along
    /// `dir`, from `side`'s point of view, without mutating the real line.
    /// Returns the window bytes and the center's offset within it.
    pub fn window(&self, cell: Cell, dir: Direction, side: Side, radius: usize) -> Option<(Vec<u8>, usize)> {
        let (idx, offset) = locate(cell, dir)?;
        let line = self.line(side, idx);
        let start = offset.saturating_sub(radius);
        let end = (offset + radius + 1).min(line.len());
        let center = offset - start;
        Some((line[start..end].to_vec(), center))
    }
}

impl Default for LineModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stone;

    #[test]
    fn all_lines_start_empty() {
        let lines = LineModel::new();
        for side in [Side::Black, Side::White] {
            for idx in 0..NUM_LINES {
                assert!(lines.line(side, idx).iter().all(|&b| b == b'0'));
            }
        }
    }

    #[test]
    fn line_lengths_sum_matches_cell_coverage() {
        // Every one of the 225 cells touches exactly 4 lines (row, col, and
        // the two diagonals it lies on, when those diagonals exist).
        let total_row_col: usize = (0..30).map(line_length).sum();
        assert_eq!(total_row_col, 15 * 15 * 2);
    }

    #[test]
    fn set_updates_both_povs_consistently() {
        let mut lines = LineModel::new();
        let cell = Cell::new(7, 7);
        lines.set(cell, Stone::Black);

        let (row_idx, offset) = locate(cell, Direction::Row).unwrap();
        assert_eq!(lines.line(Side::Black, row_idx)[offset], b'1');
        assert_eq!(lines.line(Side::White, row_idx)[offset], b'2');

        lines.set(cell, Stone::Empty);
        assert_eq!(lines.line(Side::Black, row_idx)[offset], b'0');
        assert_eq!(lines.line(Side::White, row_idx)[offset], b'0');
    }

    #[test]
    fn corner_cell_has_no_diagup_or_diagdown_beyond_bounds() {
        // (0, 14): y - x = 14, outside |y-x| <= 10.
        assert_eq!(locate(Cell::new(0, 14), Direction::DiagUp), None);
        // (0, 0): x + y = 0, outside [4, 24].
        assert_eq!(locate(Cell::new(0, 0), Direction::DiagDown), None);
    }

    #[test]
    fn window_clips_at_line_boundaries() {
        let lines = LineModel::new();
        let (window, center) = lines.window(Cell::new(0, 0), Direction::Row, Side::Black, 4).unwrap();
        assert_eq!(center, 0);
        assert_eq!(window.len(), 5); // clipped: only offsets 0..=4 exist
    }
}
