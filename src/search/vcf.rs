//! VCF (Victory by Continuous Four) quiescence search.
//!
//! Entered whenever the main PVS runs out of depth. Instead of returning
//! a static evaluation, the side to move here only considers moves that
//! either immediately make a Five/OpenFour, or make a plain Four the
//! opponent is forced to answer with its single blocking reply — a
//! bounded, fail-hard negamax kept honest by its own transposition
//! table so repeated positions across the VCF tree aren't re-searched.

use crate::pattern::{FIVE, FOUR, MAX_SCORE, MIN_SCORE, OPEN_FOUR};
use crate::types::{Cell, Side};

use super::tt::{EntryType, TranspositionTable};
use super::{compensate_mate, SearchContext};

/// Fail-hard negamax restricted to forcing four-moves and their forced
/// single replies. Returns a score from `side`'s point of view.
pub fn vcf_search(ctx: &mut SearchContext, side: Side, depth: i32, alpha_in: i32, beta: i32) -> i32 {
    let opponent = side.opponent();

    if ctx.evaluator.evaluate(side) >= FIVE {
        return compensate_mate(MAX_SCORE - 1);
    }
    if ctx.evaluator.evaluate(opponent) >= FIVE {
        return compensate_mate(MIN_SCORE + 1);
    }
    if depth <= 0 || ctx.generator.is_empty() {
        return static_diff(ctx, side);
    }

    let mut alpha = alpha_in;
    let hash = ctx.zobrist.hash();
    let probe = ctx.vcf_tt.probe(hash, alpha, beta, TranspositionTable::clamp_depth(depth), side);
    if let Some(score) = probe.score {
        return score;
    }

    let moves = forcing_moves(ctx, side);
    if moves.is_empty() {
        return static_diff(ctx, side);
    }

    let mut best_score = MIN_SCORE;
    let mut best_move = None;

    for mv in moves {
        let forcing_level = candidate_score(ctx, side, mv);
        ctx.make(mv, side);

        let score = if forcing_level >= FIVE || forcing_level >= OPEN_FOUR {
            compensate_mate(MAX_SCORE - 1)
        } else {
            // `side` just made a plain Four: find the cell(s) where it
            // would reach Five next, which is exactly what the opponent
            // must occupy to survive.
            let replies = forced_replies(ctx, side);
            if replies.len() == 1 {
                ctx.make(replies[0], opponent);
                let s = vcf_search(ctx, side, depth - 2, alpha, beta);
                ctx.undo();
                s
            } else {
                // Zero or multiple replies: this four doesn't force a win.
                MIN_SCORE
            }
        };

        ctx.undo();
        let score = compensate_mate(score);

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
            if alpha >= beta {
                break;
            }
        }
    }

    let entry_type = if best_score > alpha_in && best_score < beta {
        EntryType::Exact
    } else if best_score >= beta {
        EntryType::LowerBound
    } else {
        EntryType::UpperBound
    };
    ctx.vcf_tt
        .store(hash, TranspositionTable::clamp_depth(depth), best_score, entry_type, best_move, side);

    best_score
}

/// The static fallback when no forcing continuation remains: the raw
/// total-score difference, not a search result.
fn static_diff(ctx: &SearchContext, side: Side) -> i32 {
    ctx.evaluator.evaluate(side) - ctx.evaluator.evaluate(side.opponent())
}

/// The marginal score `side` would gain from a hypothetical stone at
/// `cell`, summed over the 4 directions, as tracked by the move
/// generator. Used both to pick forcing candidates and to tell a
/// Five/OpenFour-creating move apart from a plain Four.
fn candidate_score(ctx: &SearchContext, side: Side, cell: Cell) -> i32 {
    let Some((black, white)) = ctx.generator.direction_scores(cell) else {
        return 0;
    };
    let arr = match side {
        Side::Black => black,
        Side::White => white,
    };
    arr.iter().sum()
}

/// Candidates that make at least a Four for `side`.
fn forcing_moves(ctx: &SearchContext, side: Side) -> Vec<Cell> {
    ctx.generator
        .iter_candidates()
        .filter(|&(_, black, white)| {
            let score = match side {
                Side::Black => black,
                Side::White => white,
            };
            score >= FOUR
        })
        .map(|(c, _, _)| c)
        .collect()
}

/// Cells where `attacker` would reach Five next move — the defender's
/// only legal replies to the four just played.
fn forced_replies(ctx: &SearchContext, attacker: Side) -> Vec<Cell> {
    ctx.generator
        .iter_candidates()
        .filter(|&(_, black, white)| {
            let score = match attacker {
                Side::Black => black,
                Side::White => white,
            };
            score >= FIVE
        })
        .map(|(c, _, _)| c)
        .collect()
}
