//! Shape pattern matching over line strings, via Aho-Corasick automata
//! built once per process.
//!
//! A "shape" is a short fixed pattern over the line alphabet (`'0'`
//! empty, `'1'` the viewing side's stone, `'2'` the opponent's) worth a
//! fixed score. Move ordering and pruning thresholds depend on these
//! exact strings and scores, so they are not configurable.

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

pub const MAX_SCORE: i32 = 10_000_000;
pub const MIN_SCORE: i32 = -MAX_SCORE;

pub const ONE: i32 = 20;
pub const TWO: i32 = 120;
pub const THREE: i32 = 720;
pub const FOUR: i32 = 720;
pub const OPEN_FOUR: i32 = 4_320;
pub const FIVE: i32 = 50_000;

/// `(pattern, score)` pairs for the full shape table.
const SHAPES: &[(&str, i32)] = &[
    ("00100", ONE),
    ("01010", TWO),
    ("00110", TWO),
    ("01100", TWO),
    ("01110", THREE),
    ("010110", THREE),
    ("011010", THREE),
    ("11110", FOUR),
    ("01111", FOUR),
    ("10111", FOUR),
    ("11011", FOUR),
    ("11101", FOUR),
    ("011110", OPEN_FOUR),
    ("11111", FIVE),
];

/// The five Four shapes, used by the "four-only" matcher.
const FOUR_SHAPES: &[&str] = &["11110", "01111", "10111", "11011", "11101"];

struct ShapeTable {
    automaton: AhoCorasick,
    scores: Vec<i32>,
}

static MAIN_TABLE: Lazy<ShapeTable> = Lazy::new(|| {
    let patterns: Vec<&str> = SHAPES.iter().map(|&(p, _)| p).collect();
    let scores = SHAPES.iter().map(|&(_, s)| s).collect();
    ShapeTable {
        automaton: AhoCorasick::new(patterns).expect("shape patterns are static and valid"),
        scores,
    }
});

static FOUR_TABLE: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(FOUR_SHAPES).expect("four-shape patterns are static and valid"));

/// Sums the scores of every whole-pattern match in `line`, including
/// overlapping matches of distinct patterns (no suppression between them).
pub fn score_line(line: &[u8]) -> i32 {
    let table = &*MAIN_TABLE;
    table
        .automaton
        .find_overlapping_iter(line)
        .map(|m| table.scores[m.pattern().as_usize()])
        .sum()
}

/// Whether `window` contains at least one Four shape.
pub fn find_fours(window: &[u8]) -> bool {
    FOUR_TABLE.find_overlapping_iter(window).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_scores_exactly_its_tabulated_value() {
        for &(shape, score) in SHAPES {
            assert_eq!(
                score_line(shape.as_bytes()),
                score,
                "shape {shape:?} should score exactly {score}"
            );
        }
    }

    #[test]
    fn empty_line_scores_zero() {
        assert_eq!(score_line(b"000000000000000"), 0);
    }

    #[test]
    fn overlapping_distinct_patterns_both_count() {
        // "011110" contains an OpenFour; it also embeds "1111" adjacency
        // shared with Four patterns via overlap, but only whole-pattern
        // matches count, so the sum here is exactly OpenFour.
        assert_eq!(score_line(b"011110"), OPEN_FOUR);
    }

    #[test]
    fn two_separate_ones_sum_independently() {
        // two non-overlapping "00100" shapes padded so they don't interact
        assert_eq!(score_line(b"001000000000100"), ONE * 2);
    }

    #[test]
    fn find_fours_detects_each_four_shape() {
        for shape in FOUR_SHAPES {
            assert!(find_fours(shape.as_bytes()), "expected {shape:?} to be a four");
        }
    }

    #[test]
    fn find_fours_rejects_a_plain_three() {
        assert!(!find_fours(b"01110"));
    }

    #[test]
    fn five_and_open_four_are_the_strongest_shapes() {
        assert!(FIVE > OPEN_FOUR);
        assert!(OPEN_FOUR > FOUR);
        assert!(FOUR > THREE);
        assert!(THREE > TWO);
        assert!(TWO > ONE);
    }
}
