//! Principal-variation search: iterative deepening at the root feeding a
//! recursive PVS with null-move pruning, multi-cut, threat extension and
//! transposition-table-guided move ordering.

use crate::pattern::{MAX_SCORE, MIN_SCORE};
use crate::types::{Cell, Side};

use super::tt::EntryType;
use super::vcf::vcf_search;
use super::{
    compensate_mate, ordered_candidates, scan_threats, NodeType, SearchContext, ThreatScan, MC_C,
    MC_M, MC_R,
};

/// Runs iterative deepening from depth 1 up to `ctx.limit_depth` and
/// returns the root's best move, or `None` if the board is already full.
pub fn root_search(ctx: &mut SearchContext, side: Side) -> Option<Cell> {
    if ctx.generator.is_empty() {
        return None;
    }

    ctx.tt.new_generation();
    ctx.vcf_tt.new_generation();

    let candidates: Vec<Cell> = ctx.generator.iter_candidates().map(|(c, _, _)| c).collect();
    if candidates.len() == 1 {
        // Root special case: a single candidate is played directly.
        return Some(candidates[0]);
    }

    let mut best_point = candidates[0];
    for depth in 1..=ctx.limit_depth {
        let (_score, mv) = pvs_root(ctx, side, depth);
        if let Some(mv) = mv {
            best_point = mv;
            log::debug!("root_search: depth {depth} best {:?}", mv);
        }
    }
    Some(best_point)
}

/// The root node: always a PV node, searched with the full window.
/// Kept separate from the recursive [`pvs`] since it has no parent to
/// probe a TT entry from and always records its own hint afterward.
fn pvs_root(ctx: &mut SearchContext, side: Side, depth: i32) -> (i32, Option<Cell>) {
    let alpha0 = MIN_SCORE;
    let beta = MAX_SCORE;
    let mut alpha = alpha0;

    let hash = ctx.zobrist.hash();
    let probe = ctx.tt.probe(hash, alpha, beta, depth as i8, side);
    let candidates = ordered_candidates(ctx, &[probe.mv, probe.mv2], depth);

    let mut best_score = MIN_SCORE;
    let mut best_move = None;

    for (i, &mv) in candidates.iter().enumerate() {
        ctx.make(mv, side);
        let score = if i == 0 {
            -pvs(ctx, side.opponent(), depth - 1, -beta, -alpha, NodeType::Pv, 1)
        } else {
            let zscore = -pvs(ctx, side.opponent(), depth - 1, -alpha - 1, -alpha, NodeType::Cut, 1);
            if zscore > alpha && zscore < beta {
                -pvs(ctx, side.opponent(), depth - 1, -beta, -zscore, NodeType::Pv, 1)
            } else {
                zscore
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
        }
    }

    if best_move.is_some() {
        ctx.tt.store(hash, depth as i8, best_score, EntryType::Exact, best_move, side);
    }

    (best_score, best_move)
}

/// The recursive PVS workhorse. `side` is the side to move at this node;
/// `alpha`/`beta` are from that side's point of view. Returns a score
/// from `side`'s point of view, mate-distance compensated.
fn pvs(
    ctx: &mut SearchContext,
    side: Side,
    depth: i32,
    alpha_in: i32,
    beta: i32,
    node_type: NodeType,
    ply: i32,
) -> i32 {
    let opponent = side.opponent();
    log::trace!("pvs: depth {depth} alpha {alpha_in} beta {beta} node {node_type:?}");

    if ctx.evaluator.evaluate(side) >= crate::pattern::FIVE {
        return compensate_mate(MAX_SCORE - (ctx.limit_depth - depth) - 1);
    }
    if ctx.evaluator.evaluate(opponent) >= crate::pattern::FIVE {
        return compensate_mate(MIN_SCORE + (ctx.limit_depth - depth) + 1);
    }
    if ctx.generator.is_empty() {
        return 0;
    }
    if depth <= 0 {
        return vcf_search(ctx, side, ctx.vcf_depth, alpha_in, beta);
    }

    let mut alpha = alpha_in;
    let hash = ctx.zobrist.hash();
    let probe = ctx.tt.probe(hash, alpha, beta, depth as i8, side);
    if node_type != NodeType::Pv {
        if let Some(score) = probe.score {
            return score;
        }
    }

    let threat = scan_threats(ctx, side);
    let (extend, forced): (i32, Option<Vec<Cell>>) = match threat {
        ThreatScan::Winning(_) => {
            return compensate_mate(MAX_SCORE - (ctx.limit_depth - depth) - 1);
        }
        ThreatScan::Defend(cells) => (1, Some(cells)),
        ThreatScan::OpenFour(mv) => (0, Some(vec![mv])),
        ThreatScan::None => (0, None),
    };
    let depth_ext = depth + extend;

    // Null-move pruning: only at non-PV nodes, with no active threat
    // extension, and deep enough for the reduction to leave real work.
    if node_type != NodeType::Pv && extend == 0 && depth_ext >= 3 {
        let r = if depth_ext >= 6 { 3 } else { 2 };
        let null_depth = depth_ext - 1 - r;
        if null_depth > 0 {
            let score = -pvs(ctx, opponent, null_depth, -beta, -beta + 1, node_type.flip(), ply + 1);
            let score = compensate_mate(score);
            if score >= beta {
                return beta;
            }
        }
    }

    let mut candidates = match forced {
        Some(cells) => cells,
        None => ordered_candidates(ctx, &[probe.mv, probe.mv2], depth_ext),
    };

    // Multi-cut: several reduced-depth probes failing high at a Cut node
    // justify an early beta cutoff without searching every candidate at
    // full depth.
    if node_type == NodeType::Cut && extend == 0 && depth_ext > MC_R && candidates.len() >= MC_M {
        let mut cutoffs = 0;
        let mut hoisted = Vec::new();
        for &mv in candidates.iter().take(MC_M) {
            ctx.make(mv, side);
            let score = -pvs(ctx, opponent, depth_ext - MC_R - 1, -beta, -beta + 1, node_type.flip(), ply + 1);
            ctx.undo();
            let score = compensate_mate(score);
            if score >= beta {
                cutoffs += 1;
                hoisted.push(mv);
                if cutoffs >= MC_C {
                    return beta;
                }
            }
        }
        if !hoisted.is_empty() {
            candidates.retain(|c| !hoisted.contains(c));
            let mut reordered = hoisted;
            reordered.append(&mut candidates);
            candidates = reordered;
        }
    }

    let mut best_score = MIN_SCORE;
    let mut best_move = None;

    for (i, &mv) in candidates.iter().enumerate() {
        ctx.make(mv, side);
        let score = if node_type == NodeType::Pv && i == 0 {
            -pvs(ctx, opponent, depth_ext - 1, -beta, -alpha, NodeType::Pv, ply + 1)
        } else if i == 0 {
            -pvs(ctx, opponent, depth_ext - 1, -beta, -alpha, node_type.flip(), ply + 1)
        } else {
            let zscore = -pvs(ctx, opponent, depth_ext - 1, -alpha - 1, -alpha, node_type.flip(), ply + 1);
            if node_type == NodeType::Pv && zscore > alpha && zscore < beta {
                -pvs(ctx, opponent, depth_ext - 1, -beta, -zscore, NodeType::Pv, ply + 1)
            } else {
                zscore
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
    ctx.tt.store(hash, depth_ext as i8, best_score, entry_type, best_move, side);

    best_score
}
