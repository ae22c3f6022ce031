//! Adversarial search for two-player zero-sum games.
//!
//! A game implements [`searchable::Searchable`] and gets a family of
//! interchangeable strategies: minimax, negamax with and without memory,
//! NegaScout, MTD(f) and UCT. See [`strategy`] for how they differ.

pub mod arena;
pub mod game_tree;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod options;
pub mod prelude;
pub mod score_cache;
pub mod search_window;
pub mod searchable;
pub mod strategy;
pub mod transposition;
