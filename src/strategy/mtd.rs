//! MTD(f): converge on the root value with null-window memory searches.

use log::debug;

use super::negamax::negamax;
use super::{SearchContext, SearchError, SearchOutcome};
use crate::arena::NodeId;
use crate::search_window::{SearchWindow, INFINITY};
use crate::searchable::{perspective, Searchable, TwoPlayerMove};

const FIRST_GUESS: i32 = 0;

pub(super) fn search<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
    root: NodeId,
) -> Result<Option<SearchOutcome<S::Move>>, SearchError> {
    let depth = context.options.brute.look_ahead;

    let mut guess = FIRST_GUESS;
    let mut lower = -INFINITY;
    let mut upper = INFINITY;
    let mut chosen = None;
    let mut latest = None;
    let mut iterations = 0;

    while lower < upper {
        let beta = if guess == lower { guess + 1 } else { guess };
        guess = negamax(
            context,
            last_move,
            root,
            depth,
            0,
            SearchWindow::null_window(beta),
        )?;
        iterations += 1;

        let best_child = context.tree.get(root).and_then(|node| node.best_child);
        if best_child.is_none() {
            break;
        }
        if guess < beta {
            upper = guess;
        } else {
            lower = guess;
            chosen = best_child;
        }
        latest = best_child;
        debug!(
            "mtd pass {} with beta {} returned {}, bounds [{}, {}]",
            iterations, beta, guess, lower, upper
        );

        if context.is_interrupted() {
            break;
        }
    }

    let player1_to_move = !last_move.is_player1();
    context.resolve(root, perspective(guess, player1_to_move), chosen.or(latest));
    Ok(context.outcome(root))
}
