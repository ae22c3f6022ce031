//! Upper Confidence bounds applied to Trees.

use log::debug;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use smallvec::SmallVec;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::{NodeInfo, SearchContext, SearchError, SearchOutcome};
use crate::arena::{Arena, NodeId};
use crate::searchable::{perspective, Searchable, TwoPlayerMove, WINNING_VALUE};

/// Result of one simulated game: `Some(true)` if player one won, `None` for
/// a draw.
type Winner = Option<bool>;

#[derive(Debug)]
struct UctNode<M> {
    mv: M,
    visits: u32,
    /// Wins for the player who made `mv`. Draws count as half a win.
    wins: f64,
    children: Option<SmallVec<[NodeId; 8]>>,
}

impl<M> UctNode<M> {
    fn new(mv: M) -> Self {
        Self {
            mv,
            visits: 0,
            wins: 0.0,
            children: None,
        }
    }

    fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCB1. Unvisited nodes are always tried first.
    fn uct_value(&self, explore_exploit_ratio: f64, parent_visits: u32) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let exploration = ((parent_visits.max(1) as f64).ln() / self.visits as f64).sqrt();
        self.win_rate() + explore_exploit_ratio * exploration
    }
}

fn credit(winner: Winner, mover_is_player1: bool) -> f64 {
    match winner {
        Some(player1_won) if player1_won == mover_is_player1 => 1.0,
        Some(_) => 0.0,
        None => 0.5,
    }
}

/// Winner implied by a static score from player one's perspective.
fn winner_from_value(value: i32) -> Winner {
    if value > 0 {
        Some(true)
    } else if value < 0 {
        Some(false)
    } else {
        None
    }
}

pub(super) fn search<S: Searchable>(
    context: &mut SearchContext<'_, '_, S>,
    last_move: &S::Move,
) -> Result<Option<SearchOutcome<S::Move>>, SearchError> {
    let options = context.options.monte_carlo.clone();
    let seed = options.seed.unwrap_or_else(|| thread_rng().gen());
    debug!("uct playouts seeded with {}", seed);

    let mut uct = UctSearch {
        context,
        nodes: Arena::new(),
        rng: StdRng::seed_from_u64(seed),
        explore_exploit_ratio: options.explore_exploit_ratio,
        random_look_ahead: options.random_look_ahead,
    };

    let root = uct.nodes.insert(None, UctNode::new(last_move.clone()));
    uct.expand(root);
    if uct.children(root).is_empty() {
        return Ok(None);
    }

    for simulation in 0..options.max_simulations {
        if simulation > 0 && uct.context.is_interrupted() {
            break;
        }
        uct.play_simulation(root)?;
        uct.context
            .progress
            .set_percent_done(simulation as usize + 1, options.max_simulations as usize);
    }

    Ok(uct.outcome(root))
}

struct UctSearch<'c, 'a, 'l, S: Searchable> {
    context: &'c mut SearchContext<'a, 'l, S>,
    nodes: Arena<UctNode<S::Move>>,
    rng: StdRng,
    explore_exploit_ratio: f64,
    random_look_ahead: u32,
}

impl<'c, 'a, 'l, S: Searchable> UctSearch<'c, 'a, 'l, S> {
    fn node(&self, id: NodeId) -> &UctNode<S::Move> {
        // ids only come from this arena, which is never cleared mid-search
        self.nodes.get(id).expect("uct node id from this search")
    }

    fn children(&self, id: NodeId) -> SmallVec<[NodeId; 8]> {
        self.node(id).children.clone().unwrap_or_default()
    }

    /// Plays one simulation through `id`, which has already been made on the
    /// searchable, and returns who won it.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn play_simulation(&mut self, id: NodeId) -> Result<Winner, SearchError> {
        let last_move = self.node(id).mv.clone();
        let unexplored = {
            let node = self.node(id);
            node.visits == 0 && node.children.is_none()
        };

        let winner = if unexplored {
            self.random_playout(&last_move, self.random_look_ahead)?
        } else if self.context.searchable.done(&last_move) {
            winner_from_value(self.context.evaluate(&last_move))
        } else {
            if self.node(id).children.is_none() {
                self.expand(id);
            }
            match self.select(id) {
                Some(child) => {
                    let child_move = self.node(child).mv.clone();
                    self.notify_visit(id, child);
                    self.context.make_move(&child_move)?;
                    let winner = self.play_simulation(child);
                    self.context.undo_move(&child_move)?;
                    winner?
                }
                // no legal replies: whoever moved last wins
                None => Some(last_move.is_player1()),
            }
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.visits += 1;
            node.wins += credit(winner, node.mv.is_player1());
        }
        Ok(winner)
    }

    fn expand(&mut self, id: NodeId) {
        let last_move = self.node(id).mv.clone();
        let moves = self.context.candidate_moves(&last_move);
        let children = moves
            .into_iter()
            .map(|mv| self.nodes.insert(Some(id), UctNode::new(mv)))
            .collect();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = Some(children);
        }
    }

    /// Child with the highest UCB1 value; the first one wins ties.
    fn select(&self, id: NodeId) -> Option<NodeId> {
        let parent_visits = self.node(id).visits;
        let mut selected = None;
        let mut best_uct = f64::NEG_INFINITY;

        for child in self.children(id) {
            let uct = self
                .node(child)
                .uct_value(self.explore_exploit_ratio, parent_visits);
            if uct > best_uct {
                best_uct = uct;
                selected = Some(child);
            }
        }
        selected
    }

    /// Plays random moves from the current position until the game ends or
    /// `plies_left` runs out, then restores the position.
    fn random_playout(
        &mut self,
        last_move: &S::Move,
        plies_left: u32,
    ) -> Result<Winner, SearchError> {
        if plies_left == 0 || self.context.searchable.done(last_move) {
            return Ok(winner_from_value(self.context.evaluate(last_move)));
        }

        let moves = self.context.searchable.generate_moves(last_move);
        if moves.is_empty() {
            return Ok(Some(last_move.is_player1()));
        }
        let mv = &moves[self.rng.gen_range(0..moves.len())];

        self.context.make_move(mv)?;
        let winner = self.random_playout(mv, plies_left - 1);
        self.context.undo_move(mv)?;
        winner
    }

    fn notify_visit(&mut self, parent: NodeId, child: NodeId) {
        self.context.progress.increment_moves_considered();
        let node = self.node(child);
        let info = NodeInfo::Playouts {
            visits: node.visits,
            wins: node.wins,
        };
        let mv = node.mv.clone();
        if let Some(listener) = self.context.listener.as_mut() {
            listener.node_added(parent, child, &mv, &info);
        }
    }

    /// The most visited root move, with its win rate mapped onto the score
    /// scale.
    fn outcome(&self, root: NodeId) -> Option<SearchOutcome<S::Move>> {
        let root_children = self.children(root);
        let mut best: Option<NodeId> = None;
        for &child in root_children.iter() {
            let better = match best {
                Some(current) => self.node(child).visits > self.node(current).visits,
                None => true,
            };
            if better {
                best = Some(child);
            }
        }
        let best = best?;

        let mut principal_variation = vec![self.node(best).mv.clone()];
        let mut current = best;
        while let Some(next) = self
            .children(current)
            .into_iter()
            .filter(|&child| self.node(child).visits > 0)
            .max_by_key(|&child| self.node(child).visits)
        {
            principal_variation.push(self.node(next).mv.clone());
            current = next;
        }

        let best_node = self.node(best);
        let mover_score =
            ((2.0 * best_node.win_rate() - 1.0) * WINNING_VALUE as f64).round() as i32;

        Some(SearchOutcome {
            best_move: best_node.mv.clone(),
            inherited_value: perspective(mover_score, best_node.mv.is_player1()),
            principal_variation,
            moves_considered: 0,
            root_visits: root_children
                .iter()
                .map(|&child| (self.node(child).mv.clone(), self.node(child).visits))
                .collect(),
        })
    }
}
