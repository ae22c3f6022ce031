//! Explicit game trees.
//!
//! A `GameTree` spells out every position of a small game: each node carries
//! the value of the move that reached it and whose move that was. It is the
//! reference `Searchable` used to check strategies against hand-computed
//! answers, and the workload for the benchmarks and the command line tool.
//!
//! Nodes are labelled by the child indices on the path from the root, so the
//! second child of the first child is `"01"`. Positions past the tenth are
//! bracketed, as in `"0[12]"`. The root is `""`.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::searchable::{perspective, Searchable, TwoPlayerMove};
use crate::transposition::{HashError, HashKey, ZobristHash};

#[derive(Error, Debug, PartialEq)]
pub enum GameTreeError {
    #[error("{child} is not a move from {current}")]
    NotAChild { current: String, child: String },
    #[error("cannot undo {mv}, the current position is {current}")]
    NotCurrent { current: String, mv: String },
    #[error("no node labelled `{0}`")]
    UnknownLabel(String),
    #[error("level {level} has {len} values, which does not divide among {parents} parents")]
    UnevenLevel {
        level: usize,
        len: usize,
        parents: usize,
    },
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// A move in a `GameTree`: a reference to the node it leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreeMove {
    node: usize,
    value: i32,
    player1: bool,
}

impl TreeMove {
    pub fn node(&self) -> usize {
        self.node
    }
}

impl TwoPlayerMove for TreeMove {
    fn value(&self) -> i32 {
        self.value
    }

    fn is_player1(&self) -> bool {
        self.player1
    }
}

#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    value: i32,
    player1: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    urgent: bool,
    jeopardy: bool,
}

pub struct GameTree {
    nodes: Vec<TreeNode>,
    labels: FxHashMap<String, usize>,
    current: usize,
    zobrist: ZobristHash,
}

const ROOT: usize = 0;
const ZOBRIST_SEED: u64 = 0x5EA2C4;

impl GameTree {
    /// A tree with only a root. `root_player1` says who made the move that
    /// reached it, so the other player moves first.
    pub fn new(root_value: i32, root_player1: bool) -> Self {
        let root = TreeNode {
            label: String::new(),
            value: root_value,
            player1: root_player1,
            parent: None,
            children: Vec::new(),
            urgent: false,
            jeopardy: false,
        };
        let mut labels = FxHashMap::default();
        labels.insert(String::new(), ROOT);

        Self {
            nodes: vec![root],
            labels,
            current: ROOT,
            zobrist: ZobristHash::new(0, ZOBRIST_SEED),
        }
    }

    /// Builds a uniform tree level by level. Every level's values are split
    /// evenly among the nodes of the level above, left to right.
    pub fn from_levels(
        root_value: i32,
        root_player1: bool,
        levels: &[&[i32]],
    ) -> Result<Self, GameTreeError> {
        let mut tree = Self::new(root_value, root_player1);
        let mut parents = vec![ROOT];

        for (level, values) in levels.iter().enumerate() {
            if values.len() % parents.len() != 0 {
                return Err(GameTreeError::UnevenLevel {
                    level,
                    len: values.len(),
                    parents: parents.len(),
                });
            }
            let per_parent = values.len() / parents.len();
            let mut next = Vec::with_capacity(values.len());
            for (i, &value) in values.iter().enumerate() {
                next.push(tree.push_child(parents[i / per_parent], value));
            }
            parents = next;
        }

        tree.rebuild_hash_table();
        Ok(tree)
    }

    /// A complete tree of the given shape with values drawn from
    /// `-max_value..=max_value`. The sign of `max_value` is ignored. The same
    /// seed gives the same tree.
    pub fn random(depth: u32, branching: usize, max_value: i32, seed: u64) -> Self {
        let max_value = max_value.saturating_abs();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = Self::new(0, rng.gen());
        let mut parents = vec![ROOT];

        for _ in 0..depth {
            let mut next = Vec::with_capacity(parents.len() * branching);
            for &parent in &parents {
                for _ in 0..branching {
                    let value = rng.gen_range(-max_value..=max_value);
                    next.push(tree.push_child(parent, value));
                }
            }
            parents = next;
        }

        tree.rebuild_hash_table();
        tree
    }

    /// Adds a child under `parent_label` and returns the child's label.
    pub fn add_child(&mut self, parent_label: &str, value: i32) -> Result<String, GameTreeError> {
        let parent = self.index_of(parent_label)?;
        let child = self.push_child(parent, value);
        self.rebuild_hash_table();
        Ok(self.nodes[child].label.clone())
    }

    /// Makes the move to `label` one that `generate_urgent_moves` returns.
    pub fn mark_urgent(&mut self, label: &str) -> Result<(), GameTreeError> {
        let index = self.index_of(label)?;
        self.nodes[index].urgent = true;
        Ok(())
    }

    /// Marks the position reached by `label` as in jeopardy for the side to
    /// move there.
    pub fn mark_jeopardy(&mut self, label: &str) -> Result<(), GameTreeError> {
        let index = self.index_of(label)?;
        self.nodes[index].jeopardy = true;
        Ok(())
    }

    /// The move that reached the root, to pass as the last move of a search.
    pub fn root_move(&self) -> TreeMove {
        self.tree_move(ROOT)
    }

    pub fn find(&self, label: &str) -> Result<TreeMove, GameTreeError> {
        self.index_of(label).map(|index| self.tree_move(index))
    }

    pub fn label(&self, mv: &TreeMove) -> &str {
        self.nodes
            .get(mv.node)
            .map(|node| node.label.as_str())
            .unwrap_or("?")
    }

    /// Label of the current position.
    pub fn current_label(&self) -> &str {
        &self.nodes[self.current].label
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Plain minimax value of `label`'s subtree from player one's
    /// perspective, for checking search results.
    pub fn minimax_value(&self, label: &str) -> Result<i32, GameTreeError> {
        Ok(self.minimax_of(self.index_of(label)?))
    }

    fn minimax_of(&self, index: usize) -> i32 {
        let node = &self.nodes[index];
        let child_values = node.children.iter().map(|&child| self.minimax_of(child));
        // the children are moved by the opponent of whoever reached this node
        let value = if node.player1 {
            child_values.min()
        } else {
            child_values.max()
        };
        value.unwrap_or(node.value)
    }

    fn push_child(&mut self, parent: usize, value: i32) -> usize {
        let index = self.nodes.len();
        let position = self.nodes[parent].children.len();
        let label = if position < 10 {
            format!("{}{}", self.nodes[parent].label, position)
        } else {
            format!("{}[{}]", self.nodes[parent].label, position)
        };
        let player1 = !self.nodes[parent].player1;

        self.nodes.push(TreeNode {
            label: label.clone(),
            value,
            player1,
            parent: Some(parent),
            children: Vec::new(),
            urgent: false,
            jeopardy: false,
        });
        self.nodes[parent].children.push(index);
        self.labels.insert(label, index);
        index
    }

    /// One random number per node; the key of a position is the XOR of the
    /// numbers along its path.
    fn rebuild_hash_table(&mut self) {
        self.zobrist = ZobristHash::new(self.nodes.len(), ZOBRIST_SEED);
        self.current = ROOT;
    }

    fn index_of(&self, label: &str) -> Result<usize, GameTreeError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| GameTreeError::UnknownLabel(label.to_string()))
    }

    fn tree_move(&self, index: usize) -> TreeMove {
        let node = &self.nodes[index];
        TreeMove {
            node: index,
            value: node.value,
            player1: node.player1,
        }
    }

    /// Children of `node`, best first for the player making them.
    fn ordered_children(&self, node: usize, urgent_only: bool) -> Vec<TreeMove> {
        let mut moves: Vec<TreeMove> = self.nodes[node]
            .children
            .iter()
            .filter(|&&child| !urgent_only || self.nodes[child].urgent)
            .map(|&child| self.tree_move(child))
            .collect();
        moves.sort_by_key(|mv| -perspective(mv.value, mv.player1));
        moves
    }
}

impl Searchable for GameTree {
    type Move = TreeMove;
    type Error = GameTreeError;

    fn generate_moves(&mut self, _last_move: &TreeMove) -> Vec<TreeMove> {
        self.ordered_children(self.current, false)
    }

    fn generate_urgent_moves(&mut self, _last_move: &TreeMove) -> Vec<TreeMove> {
        self.ordered_children(self.current, true)
    }

    fn in_jeopardy(&self, _last_move: &TreeMove) -> bool {
        self.nodes[self.current].jeopardy
    }

    fn worth(&self, _last_move: &TreeMove) -> i32 {
        self.nodes[self.current].value
    }

    fn done(&self, _last_move: &TreeMove) -> bool {
        self.nodes[self.current].children.is_empty()
    }

    fn make_internal_move(&mut self, mv: &TreeMove) -> Result<(), GameTreeError> {
        if self.nodes.get(mv.node).and_then(|node| node.parent) != Some(self.current) {
            return Err(GameTreeError::NotAChild {
                current: self.current_label().to_string(),
                child: self.label(mv).to_string(),
            });
        }
        self.zobrist.apply_state(mv.node)?;
        self.current = mv.node;
        Ok(())
    }

    fn undo_internal_move(&mut self, mv: &TreeMove) -> Result<(), GameTreeError> {
        if mv.node != self.current {
            return Err(GameTreeError::NotCurrent {
                current: self.current_label().to_string(),
                mv: self.label(mv).to_string(),
            });
        }
        self.zobrist.apply_state(mv.node)?;
        self.current = self.nodes[mv.node].parent.unwrap_or(ROOT);
        Ok(())
    }

    fn hash_key(&self) -> HashKey {
        self.zobrist.key()
    }
}

impl fmt::Display for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(
            tree: &GameTree,
            f: &mut fmt::Formatter<'_>,
            index: usize,
            indent: usize,
        ) -> fmt::Result {
            let node = &tree.nodes[index];
            let player = if node.player1 { "P1" } else { "P2" };
            let label = if node.label.is_empty() {
                "root"
            } else {
                node.label.as_str()
            };
            writeln!(f, "{:indent$}{} {} {}", "", label, player, node.value, indent = indent)?;
            for &child in &node.children {
                write_node(tree, f, child, indent + 2)?;
            }
            Ok(())
        }

        write_node(self, f, ROOT, 0)
    }
}

#[cfg(test)]
mod tests;
