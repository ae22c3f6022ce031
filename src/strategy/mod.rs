//! Game-tree search strategies.
//!
//! # Strategies
//!
//! All brute-force strategies share one recursive core, parameterized by the
//! options of the selected [`SearchStrategyType`]:
//!
//! ## MiniMax
//! Scores are kept from player one's perspective. Player one maximizes and
//! player two minimizes. With alpha-beta enabled the window narrows as
//! siblings resolve and the remaining siblings are skipped once it closes.
//!
//! ## NegaMax
//! Scores are kept from the perspective of the side to move, so every level
//! maximizes the negation of its children. Fail-soft: a node may return a
//! value outside its window, which makes the bounds it reports tighter.
//!
//! ## Memory (NegaMax/NegaScout with memory, MTD(f))
//! Before expanding a node the transposition table is consulted. Bounds that
//! settle the current window end the node immediately. A stored move that
//! does not settle it is tried first.
//!
//! ## NegaScout
//! The first child is searched with the full window and later children with
//! a null window that only proves they are no better. A child that proves
//! otherwise is searched again with the full window.
//!
//! ## MTD(f)
//! Repeated null-window memory searches around a guess, moving the guess to
//! the returned value until the upper and lower bounds meet.
//!
//! ## UCT
//! Monte-Carlo tree search. Children are chosen by UCB1, new nodes are scored
//! by a random playout, and the root child with the most visits is played.
//!
//! ## Quiescence
//! When the look-ahead runs out, positions the game reports as in jeopardy
//! are searched one more full ply and urgent moves are still explored, up to
//! `max_quiescent_depth` plies from the root.

pub mod listener;
mod minimax;
mod mtd;
mod negamax;
pub mod progress;
mod uct;


use std::fmt::Debug;
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::arena::{Arena, NodeId};
use crate::options::{OptionsError, SearchOptions, SearchStrategyType};
use crate::score_cache::ScoreCache;
use crate::search_window::SearchWindow;
use crate::searchable::{Searchable, TwoPlayerMove};
use crate::transposition::TranspositionTable;

pub use listener::{NodeInfo, RecordedNode, SearchTreeListener, TreeRecorder};
pub use progress::SearchProgress;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("failed to {action} {mv}: {reason}")]
    PreconditionViolation {
        action: &'static str,
        mv: String,
        reason: String,
    },
    #[error("invalid search options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl SearchError {
    fn precondition<M: Debug, E: std::error::Error>(
        action: &'static str,
        mv: &M,
        error: E,
    ) -> Self {
        SearchError::PreconditionViolation {
            action,
            mv: format!("{:?}", mv),
            reason: error.to_string(),
        }
    }
}

/// A move visited by a brute-force search, with the value backed up to it.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveNode<M> {
    pub mv: M,
    /// Backed-up score from player one's perspective.
    pub inherited_value: i32,
    pub best_child: Option<NodeId>,
}

impl<M> MoveNode<M> {
    fn new(mv: M) -> Self {
        Self {
            mv,
            inherited_value: 0,
            best_child: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<M> {
    pub best_move: M,
    /// Value of the root position from player one's perspective.
    pub inherited_value: i32,
    /// Expected line of play, starting with `best_move`.
    pub principal_variation: Vec<M>,
    pub moves_considered: usize,
    /// Visit count of every root move. Only filled in by UCT.
    pub root_visits: Vec<(M, u32)>,
}

/// A configured search strategy together with the caches it owns.
///
/// Caches persist across calls to [`SearchStrategy::search`] until
/// [`SearchStrategy::reset_caches`] is called. A strategy serves one game at
/// a time; run concurrent games with separate strategies.
pub struct SearchStrategy<M: TwoPlayerMove> {
    options: SearchOptions,
    transposition_table: TranspositionTable<M>,
    score_cache: ScoreCache,
    progress: Arc<SearchProgress>,
    tree: Arena<MoveNode<M>>,
}

impl<M: TwoPlayerMove> SearchStrategy<M> {
    pub fn new(options: SearchOptions) -> Result<Self, SearchError> {
        options.validate()?;

        Ok(Self {
            transposition_table: TranspositionTable::new(options.brute.transposition_capacity),
            score_cache: ScoreCache::new(options.brute.score_cache_capacity),
            progress: Arc::new(SearchProgress::new()),
            tree: Arena::new(),
            options,
        })
    }

    pub fn strategy_type(&self) -> SearchStrategyType {
        self.options.strategy_type
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn transposition_table(&self) -> &TranspositionTable<M> {
        &self.transposition_table
    }

    pub fn score_cache(&self) -> &ScoreCache {
        &self.score_cache
    }

    /// Handle for polling or interrupting a search from another thread.
    pub fn progress(&self) -> Arc<SearchProgress> {
        Arc::clone(&self.progress)
    }

    /// Tree of the last brute-force search.
    pub fn tree(&self) -> &Arena<MoveNode<M>> {
        &self.tree
    }

    pub fn reset_caches(&mut self) {
        self.transposition_table.clear();
        self.score_cache.clear();
        self.tree.clear();
    }

    /// Finds the best reply to `last_move` in the current position.
    ///
    /// The searchable is returned to the same position it started in.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(outcome))` - The chosen move and its backed-up value
    /// - `Ok(None)` - The side to move has no legal moves
    /// - `Err(SearchError::PreconditionViolation)` - The game rejected a make or undo
    #[must_use = "search returns the best move found"]
    pub fn search<S>(
        &mut self,
        searchable: &mut S,
        last_move: &M,
        listener: Option<&mut dyn SearchTreeListener<M>>,
    ) -> Result<Option<SearchOutcome<M>>, SearchError>
    where
        S: Searchable<Move = M>,
    {
        let strategy_type = self.options.strategy_type;
        debug!("{} search after {:?}", strategy_type, last_move);

        self.progress.reset();
        self.tree.clear();
        let root = self.tree.insert(None, MoveNode::new(last_move.clone()));

        let mut context = SearchContext {
            searchable,
            options: &self.options,
            transposition_table: &mut self.transposition_table,
            score_cache: &mut self.score_cache,
            progress: &self.progress,
            tree: &mut self.tree,
            listener,
        };

        let outcome = match strategy_type {
            SearchStrategyType::MiniMax => minimax::search(&mut context, last_move, root)?,
            SearchStrategyType::NegaMax
            | SearchStrategyType::NegaMaxWithMemory
            | SearchStrategyType::NegaScout
            | SearchStrategyType::NegaScoutWithMemory => {
                negamax::search(&mut context, last_move, root)?
            }
            SearchStrategyType::Mtd => mtd::search(&mut context, last_move, root)?,
            SearchStrategyType::Uct => uct::search(&mut context, last_move)?,
        };

        let moves_considered = self.progress.moves_considered();
        debug!(
            "{} considered {} moves, table: {}",
            strategy_type, moves_considered, self.transposition_table
        );

        Ok(outcome.map(|outcome| SearchOutcome {
            moves_considered,
            ..outcome
        }))
    }
}

/// Everything one search call works with, borrowed from the strategy.
struct SearchContext<'a, 'l, S: Searchable> {
    searchable: &'a mut S,
    options: &'a SearchOptions,
    transposition_table: &'a mut TranspositionTable<S::Move>,
    score_cache: &'a mut ScoreCache,
    progress: &'a SearchProgress,
    tree: &'a mut Arena<MoveNode<S::Move>>,
    listener: Option<&'a mut (dyn SearchTreeListener<S::Move> + 'l)>,
}

impl<'a, 'l, S: Searchable> SearchContext<'a, 'l, S> {
    fn is_interrupted(&self) -> bool {
        self.progress.is_interrupted()
    }

    /// Static value of the current position from player one's perspective.
    fn evaluate(&mut self, last_move: &S::Move) -> i32 {
        if !self.options.brute.use_score_cache {
            return self.searchable.worth(last_move);
        }
        let key = self.searchable.hash_key();
        let searchable = &*self.searchable;
        self.score_cache
            .get_or_insert_with(key, || searchable.worth(last_move))
    }

    /// Ordered legal replies to `last_move`, trimmed to the best few.
    fn candidate_moves(&mut self, last_move: &S::Move) -> Vec<S::Move> {
        let mut moves = self.searchable.generate_moves(last_move);
        self.options.best_moves.select(&mut moves);
        moves
    }

    /// Makes `mv`, runs `f` on the resulting position, then undoes `mv`.
    fn with_move_applied<R, F>(&mut self, mv: &S::Move, f: F) -> Result<R, SearchError>
    where
        F: FnOnce(&mut Self) -> Result<R, SearchError>,
    {
        self.make_move(mv)?;
        let result = f(self);
        self.undo_move(mv)?;
        result
    }

    fn make_move(&mut self, mv: &S::Move) -> Result<(), SearchError> {
        self.searchable
            .make_internal_move(mv)
            .map_err(|error| SearchError::precondition("make", mv, error))
    }

    fn undo_move(&mut self, mv: &S::Move) -> Result<(), SearchError> {
        self.searchable
            .undo_internal_move(mv)
            .map_err(|error| SearchError::precondition("undo", mv, error))
    }

    fn add_node(&mut self, parent: NodeId, mv: &S::Move, window: SearchWindow) -> NodeId {
        self.progress.increment_moves_considered();
        let child = self.tree.insert(Some(parent), MoveNode::new(mv.clone()));
        if let Some(listener) = self.listener.as_mut() {
            listener.node_added(parent, child, mv, &NodeInfo::Window(window));
        }
        child
    }

    fn notify_pruned(
        &mut self,
        parent: NodeId,
        pruned: &[S::Move],
        value: i32,
        window: SearchWindow,
    ) {
        if pruned.is_empty() {
            return;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.nodes_pruned(parent, pruned, value, window);
        }
    }

    /// Records the backed-up value (player one's perspective) of a node.
    fn resolve(&mut self, node: NodeId, inherited_value: i32, best_child: Option<NodeId>) {
        if let Some(node) = self.tree.get_mut(node) {
            node.inherited_value = inherited_value;
            node.best_child = best_child;
        }
    }

    fn set_inherited_value(&mut self, node: NodeId, inherited_value: i32) {
        if let Some(node) = self.tree.get_mut(node) {
            node.inherited_value = inherited_value;
        }
    }

    fn report_root_progress(&self, ply: u32, done: usize, total: usize) {
        if ply == 0 {
            self.progress.set_percent_done(done, total);
        }
    }

    /// Builds the result from the resolved tree, or `None` if the root has no
    /// resolved child.
    fn outcome(&self, root: NodeId) -> Option<SearchOutcome<S::Move>> {
        let root_node = self.tree.get(root)?;
        let best_child = root_node.best_child?;
        let best_move = self.tree.get(best_child)?.mv.clone();

        let mut leaf = best_child;
        while let Some(next) = self.tree.get(leaf).and_then(|node| node.best_child) {
            leaf = next;
        }
        let principal_variation = self
            .tree
            .path_to(leaf)
            .into_iter()
            .skip(1)
            .filter_map(|id| self.tree.get(id))
            .map(|node| node.mv.clone())
            .collect();

        Some(SearchOutcome {
            best_move,
            inherited_value: root_node.inherited_value,
            principal_variation,
            moves_considered: 0,
            root_visits: Vec::new(),
        })
    }
}
