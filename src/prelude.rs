//! Common types re-exported for convenience.

pub use crate::options::{
    BestMovesSearchOptions, BruteSearchOptions, MonteCarloSearchOptions, SearchOptions,
    SearchStrategyType,
};
pub use crate::search_window::SearchWindow;
pub use crate::searchable::{perspective, Searchable, TwoPlayerMove, WINNING_VALUE};
pub use crate::strategy::{SearchError, SearchOutcome, SearchStrategy, SearchTreeListener};
pub use crate::transposition::HashKey;
