//! Alternating max/min search over scores from player one's perspective.

use std::cmp::{max, min};

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{SearchContext, SearchError, SearchOutcome};
use crate::arena::NodeId;
use crate::search_window::{SearchWindow, INFINITY};
use crate::searchable::{perspective, Searchable, TwoPlayerMove, WINNING_VALUE};

pub(super) fn search<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    root: NodeId,
) -> Result<Option<SearchOutcome<S::Move>>, SearchError> {
    let brute = &context.options.brute;
    let (look_ahead, window) = (brute.look_ahead, brute.initial_window);

    minimax(context, last_move, root, look_ahead, 0, window)?;
    Ok(context.outcome(root))
}

/// Returns the value of the position after `last_move`, searched `depth`
/// more plies, from player one's perspective.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn minimax<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    node: NodeId,
    depth: u32,
    ply: u32,
    window: SearchWindow,
) -> Result<i32, SearchError> {
    if ply > 0 && context.searchable.done(last_move) {
        return Ok(context.evaluate(last_move));
    }
    if depth == 0 {
        return if context.options.brute.quiescence {
            quiescent_minimax(context, last_move, node, ply, window)
        } else {
            Ok(context.evaluate(last_move))
        };
    }

    let moves = context.candidate_moves(last_move);
    if moves.is_empty() {
        return Ok(perspective(WINNING_VALUE, last_move.is_player1()));
    }
    expand(context, &moves, node, ply, window, |context, mv, child, window| {
        minimax(context, mv, child, depth - 1, ply + 1, window)
    })
}

/// Searches past the horizon while the position is unsettled.
///
/// In jeopardy every reply is searched. Otherwise the side to move may stand
/// on the static value or try one of the urgent moves.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn quiescent_minimax<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    node: NodeId,
    ply: u32,
    window: SearchWindow,
) -> Result<i32, SearchError> {
    let stand_pat = context.evaluate(last_move);
    if ply >= context.options.brute.max_quiescent_depth {
        return Ok(stand_pat);
    }

    if context.searchable.in_jeopardy(last_move) {
        let moves = context.candidate_moves(last_move);
        if moves.is_empty() {
            return Ok(perspective(WINNING_VALUE, last_move.is_player1()));
        }
        return expand(context, &moves, node, ply, window, |context, mv, child, window| {
            quiescent_minimax(context, mv, child, ply + 1, window)
        });
    }

    let moves = context.searchable.generate_urgent_moves(last_move);
    if moves.is_empty() {
        return Ok(stand_pat);
    }

    let player1_to_move = !last_move.is_player1();
    let mut window = window;
    if context.options.brute.alpha_beta {
        if player1_to_move {
            if stand_pat >= window.beta {
                return Ok(stand_pat);
            }
            window.alpha = max(window.alpha, stand_pat);
        } else {
            if stand_pat <= window.alpha {
                return Ok(stand_pat);
            }
            window.beta = min(window.beta, stand_pat);
        }
    }

    let value = expand(context, &moves, node, ply, window, |context, mv, child, window| {
        quiescent_minimax(context, mv, child, ply + 1, window)
    })?;
    let stand_pat_holds = if player1_to_move {
        stand_pat >= value
    } else {
        stand_pat <= value
    };
    if stand_pat_holds {
        context.resolve(node, stand_pat, None);
        return Ok(stand_pat);
    }
    Ok(value)
}

/// Searches each of `moves` with `search_child` and backs up the best value
/// for the side to move, pruning once the window closes.
fn expand<S, F>(
    context: &mut SearchContext<'_, '_, S>,
    moves: &[S::Move],
    node: NodeId,
    ply: u32,
    mut window: SearchWindow,
    mut search_child: F,
) -> Result<i32, SearchError>
where
    S: Searchable,
    F: FnMut(
        &mut SearchContext<'_, '_, S>,
        &S::Move,
        NodeId,
        SearchWindow,
    ) -> Result<i32, SearchError>,
{
    let player1_to_move = moves
        .first()
        .map(|mv| mv.is_player1())
        .unwrap_or(true);
    let alpha_beta = context.options.brute.alpha_beta;

    let mut best_value = if player1_to_move { -INFINITY } else { INFINITY };
    let mut best_child = None;

    for (i, mv) in moves.iter().enumerate() {
        if best_child.is_some() && context.is_interrupted() {
            break;
        }

        let child = context.add_node(node, mv, window);
        let child_window = if alpha_beta {
            window
        } else {
            SearchWindow::default()
        };
        let value = context.with_move_applied(mv, |context| {
            search_child(context, mv, child, child_window)
        })?;
        context.set_inherited_value(child, value);
        context.report_root_progress(ply, i + 1, moves.len());

        let improved = if player1_to_move {
            value > best_value
        } else {
            value < best_value
        };
        if improved {
            best_value = value;
            best_child = Some(child);
        }

        if alpha_beta {
            if player1_to_move {
                window.alpha = max(window.alpha, value);
            } else {
                window.beta = min(window.beta, value);
            }
            if window.alpha >= window.beta {
                context.notify_pruned(node, &moves[i + 1..], value, window);
                break;
            }
        }
    }

    context.resolve(node, best_value, best_child);
    Ok(best_value)
}
