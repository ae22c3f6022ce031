//! Observer hooks for watching a search build its tree.

use std::fmt::Debug;

use crate::arena::NodeId;
use crate::search_window::SearchWindow;

/// What a strategy knew about a node when it was visited.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeInfo {
    /// The window the node was searched with.
    Window(SearchWindow),
    /// Playout statistics of a UCT node, from the perspective of the player
    /// who made the move.
    Playouts { visits: u32, wins: f64 },
}

/// Receives nodes as a search visits them. Used for debugging and for
/// drawing the game tree.
pub trait SearchTreeListener<M> {
    fn node_added(&mut self, parent: NodeId, child: NodeId, mv: &M, info: &NodeInfo);

    /// Called when alpha-beta skips the remaining siblings of a node.
    /// `value` is the score that caused the cutoff.
    fn nodes_pruned(&mut self, _parent: NodeId, _pruned: &[M], _value: i32, _window: SearchWindow) {
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedNode<M> {
    pub parent: NodeId,
    pub child: NodeId,
    pub mv: M,
    pub info: NodeInfo,
}

/// Listener that keeps everything it is told, in order.
#[derive(Debug)]
pub struct TreeRecorder<M> {
    pub nodes: Vec<RecordedNode<M>>,
    pub pruned: usize,
    pub cutoffs: usize,
}

impl<M> Default for TreeRecorder<M> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            pruned: 0,
            cutoffs: 0,
        }
    }
}

impl<M> TreeRecorder<M> {
    pub fn children_of(&self, parent: NodeId) -> impl Iterator<Item = &RecordedNode<M>> {
        self.nodes.iter().filter(move |node| node.parent == parent)
    }
}

impl<M: Clone + Debug> SearchTreeListener<M> for TreeRecorder<M> {
    fn node_added(&mut self, parent: NodeId, child: NodeId, mv: &M, info: &NodeInfo) {
        self.nodes.push(RecordedNode {
            parent,
            child,
            mv: mv.clone(),
            info: *info,
        });
    }

    fn nodes_pruned(&mut self, _parent: NodeId, pruned: &[M], _value: i32, _window: SearchWindow) {
        self.cutoffs += 1;
        self.pruned += pruned.len();
    }
}
