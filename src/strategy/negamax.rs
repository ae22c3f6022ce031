//! Fail-soft negamax with optional memory and scout windows.

use std::cmp::max;

use log::trace;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{SearchContext, SearchError, SearchOutcome};
use crate::arena::NodeId;
use crate::search_window::{SearchWindow, INFINITY};
use crate::searchable::{perspective, Searchable, TwoPlayerMove, WINNING_VALUE};
use crate::transposition::Probe;

pub(super) fn search<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    root: NodeId,
) -> Result<Option<SearchOutcome<S::Move>>, SearchError> {
    let brute = &context.options.brute;
    let (look_ahead, window) = (brute.look_ahead, brute.initial_window);

    negamax(context, last_move, root, look_ahead, 0, window)?;
    Ok(context.outcome(root))
}

/// Returns the value of the position after `last_move`, searched `depth`
/// more plies, for the side to move.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub(super) fn negamax<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    node: NodeId,
    depth: u32,
    ply: u32,
    window: SearchWindow,
) -> Result<i32, SearchError> {
    let player1_to_move = !last_move.is_player1();

    if ply > 0 && context.searchable.done(last_move) {
        let value = context.evaluate(last_move);
        return Ok(perspective(value, player1_to_move));
    }
    if depth == 0 {
        return if context.options.brute.quiescence {
            quiescent_negamax(context, last_move, node, ply, window)
        } else {
            let value = context.evaluate(last_move);
            Ok(perspective(value, player1_to_move))
        };
    }

    let strategy_type = context.options.strategy_type;
    let uses_memory = strategy_type.uses_memory();
    let alpha_beta = context.options.brute.alpha_beta;
    let scout = alpha_beta && strategy_type.uses_scout_window();

    let key = context.searchable.hash_key();
    let mut hint = None;
    if uses_memory {
        if ply == 0 {
            // the root is always expanded so that a move comes back
            hint = context
                .transposition_table
                .get(&key)
                .and_then(|entry| entry.best_move.clone());
        } else {
            match context.transposition_table.probe(&key, depth, window) {
                Probe::Hit { value, .. } => {
                    trace!("table hit at depth {} in {}: {}", depth, window, value);
                    context.set_inherited_value(node, perspective(value, player1_to_move));
                    return Ok(value);
                }
                Probe::NearHit { best_move } => hint = best_move,
                Probe::Miss => {}
            }
        }
    }

    let mut moves = context.candidate_moves(last_move);
    if moves.is_empty() {
        return Ok(-WINNING_VALUE);
    }
    if let Some(hint) = hint {
        promote(&mut moves, &hint);
    }

    let mut alpha = window.alpha;
    let mut best_value = -INFINITY;
    let mut best_move = None;
    let mut best_child = None;

    for (i, mv) in moves.iter().enumerate() {
        if best_child.is_some() && context.is_interrupted() {
            break;
        }

        let child_window = if alpha_beta {
            SearchWindow::new(alpha, window.beta)
        } else {
            SearchWindow::default()
        };
        let child = context.add_node(node, mv, child_window);

        let value = context.with_move_applied(mv, |context| {
            if scout && i > 0 {
                let null_window = SearchWindow::null_window(-alpha);
                let scouted = -negamax(context, mv, child, depth - 1, ply + 1, null_window)?;
                if scouted <= alpha || scouted >= window.beta {
                    return Ok(scouted);
                }
            }
            let value = negamax(
                context,
                mv,
                child,
                depth - 1,
                ply + 1,
                child_window.negate_and_swap(),
            )?;
            Ok(-value)
        })?;
        context.set_inherited_value(child, perspective(value, player1_to_move));
        context.report_root_progress(ply, i + 1, moves.len());

        if value > best_value {
            best_value = value;
            best_move = Some(mv.clone());
            best_child = Some(child);
        }

        if alpha_beta {
            alpha = max(alpha, value);
            if alpha >= window.beta {
                context.notify_pruned(node, &moves[i + 1..], value, window);
                break;
            }
        }
    }

    if uses_memory && !context.is_interrupted() {
        context
            .transposition_table
            .store(key, depth, window, best_value, best_move);
    }
    context.resolve(node, perspective(best_value, player1_to_move), best_child);
    Ok(best_value)
}

/// Horizon extension: replies to a position in jeopardy, or urgent moves on
/// top of the static value, until the position is quiet.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn quiescent_negamax<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    node: NodeId,
    ply: u32,
    window: SearchWindow,
) -> Result<i32, SearchError> {
    let player1_to_move = !last_move.is_player1();
    let stand_pat = perspective(context.evaluate(last_move), player1_to_move);
    if ply >= context.options.brute.max_quiescent_depth {
        return Ok(stand_pat);
    }

    let jeopardy = context.searchable.in_jeopardy(last_move);
    let moves = if jeopardy {
        context.candidate_moves(last_move)
    } else {
        context.searchable.generate_urgent_moves(last_move)
    };
    if moves.is_empty() {
        return Ok(if jeopardy { -WINNING_VALUE } else { stand_pat });
    }

    let alpha_beta = context.options.brute.alpha_beta;
    let mut alpha = window.alpha;
    let mut best_value = -INFINITY;
    if !jeopardy {
        best_value = stand_pat;
        if alpha_beta {
            if stand_pat >= window.beta {
                return Ok(stand_pat);
            }
            alpha = max(alpha, stand_pat);
        }
    }
    let mut best_child = None;

    for (i, mv) in moves.iter().enumerate() {
        if best_child.is_some() && context.is_interrupted() {
            break;
        }

        let child_window = if alpha_beta {
            SearchWindow::new(alpha, window.beta)
        } else {
            SearchWindow::default()
        };
        let child = context.add_node(node, mv, child_window);
        let value = context.with_move_applied(mv, |context| {
            let value =
                quiescent_negamax(context, mv, child, ply + 1, child_window.negate_and_swap())?;
            Ok(-value)
        })?;
        context.set_inherited_value(child, perspective(value, player1_to_move));

        if value > best_value {
            best_value = value;
            best_child = Some(child);
        }
        if alpha_beta {
            alpha = max(alpha, value);
            if alpha >= window.beta {
                context.notify_pruned(node, &moves[i + 1..], value, window);
                break;
            }
        }
    }

    context.resolve(node, perspective(best_value, player1_to_move), best_child);
    Ok(best_value)
}

/// Moves `hint` to the front, keeping the order of the others.
fn promote<M: PartialEq>(moves: &mut [M], hint: &M) {
    if let Some(pos) = moves.iter().position(|mv| mv == hint) {
        if pos > 0 {
            moves[0..=pos].rotate_right(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::promote;

    #[test]
    fn test_promote_moves_hint_to_front() {
        let mut moves = vec![1, 2, 3, 4];
        promote(&mut moves, &3);
        assert_eq!(moves, vec![3, 1, 2, 4]);

        promote(&mut moves, &9);
        assert_eq!(moves, vec![3, 1, 2, 4]);
    }
}
