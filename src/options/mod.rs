//! Configuration for a search: which strategy runs and how it is tuned.
//!
//! Options are plain values with `Default` impls and `with_*` setters. They
//! are validated once when a strategy is built and are not changed while a
//! search runs.

pub mod best_moves;
pub mod brute;
pub mod monte_carlo;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::search_window::SearchWindow;

pub use best_moves::BestMovesSearchOptions;
pub use brute::BruteSearchOptions;
pub use monte_carlo::MonteCarloSearchOptions;

#[derive(Error, Debug, PartialEq)]
pub enum OptionsError {
    #[error("look ahead must be at least 1")]
    ZeroLookAhead,
    #[error("max quiescent depth {max_quiescent_depth} is below the look ahead of {look_ahead}")]
    QuiescentDepthTooLow {
        max_quiescent_depth: u32,
        look_ahead: u32,
    },
    #[error("initial search window {0} is empty")]
    EmptyWindow(SearchWindow),
    #[error("{name} must be between 1 and 100, got {value}")]
    PercentageOutOfRange { name: &'static str, value: u32 },
    #[error("min best moves must be at least 1")]
    ZeroMinBestMoves,
    #[error("max simulations must be at least 1")]
    ZeroSimulations,
    #[error("explore/exploit ratio must be a non-negative number, got {0}")]
    NegativeExploreRatio(f64),
    #[error("unknown search strategy `{0}`")]
    UnknownStrategy(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStrategyType {
    MiniMax,
    NegaMax,
    NegaMaxWithMemory,
    NegaScout,
    NegaScoutWithMemory,
    Mtd,
    Uct,
}

pub const ALL_STRATEGY_TYPES: [SearchStrategyType; 7] = [
    SearchStrategyType::MiniMax,
    SearchStrategyType::NegaMax,
    SearchStrategyType::NegaMaxWithMemory,
    SearchStrategyType::NegaScout,
    SearchStrategyType::NegaScoutWithMemory,
    SearchStrategyType::Mtd,
    SearchStrategyType::Uct,
];

impl SearchStrategyType {
    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategyType::MiniMax => "minimax",
            SearchStrategyType::NegaMax => "negamax",
            SearchStrategyType::NegaMaxWithMemory => "negamax-w-memory",
            SearchStrategyType::NegaScout => "negascout",
            SearchStrategyType::NegaScoutWithMemory => "negascout-w-memory",
            SearchStrategyType::Mtd => "mtd",
            SearchStrategyType::Uct => "uct",
        }
    }

    /// Whether the strategy consults the transposition table.
    pub fn uses_memory(&self) -> bool {
        matches!(
            self,
            SearchStrategyType::NegaMaxWithMemory
                | SearchStrategyType::NegaScoutWithMemory
                | SearchStrategyType::Mtd
        )
    }

    pub fn uses_scout_window(&self) -> bool {
        matches!(
            self,
            SearchStrategyType::NegaScout | SearchStrategyType::NegaScoutWithMemory
        )
    }

    pub fn is_monte_carlo(&self) -> bool {
        *self == SearchStrategyType::Uct
    }
}

impl fmt::Display for SearchStrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchStrategyType {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ALL_STRATEGY_TYPES
            .iter()
            .copied()
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| OptionsError::UnknownStrategy(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    pub strategy_type: SearchStrategyType,
    pub brute: BruteSearchOptions,
    pub best_moves: BestMovesSearchOptions,
    pub monte_carlo: MonteCarloSearchOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(SearchStrategyType::MiniMax)
    }
}

impl SearchOptions {
    pub fn new(strategy_type: SearchStrategyType) -> Self {
        Self {
            strategy_type,
            brute: BruteSearchOptions::default(),
            best_moves: BestMovesSearchOptions::default(),
            monte_carlo: MonteCarloSearchOptions::default(),
        }
    }

    pub fn with_brute(mut self, brute: BruteSearchOptions) -> Self {
        self.brute = brute;
        self
    }

    pub fn with_best_moves(mut self, best_moves: BestMovesSearchOptions) -> Self {
        self.best_moves = best_moves;
        self
    }

    pub fn with_monte_carlo(mut self, monte_carlo: MonteCarloSearchOptions) -> Self {
        self.monte_carlo = monte_carlo;
        self
    }

    /// Validates the sub-options the selected strategy reads.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.strategy_type.is_monte_carlo() {
            self.monte_carlo.validate()
        } else {
            self.brute.validate()?;
            self.best_moves.validate()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in ALL_STRATEGY_TYPES.iter() {
            assert_eq!(strategy.name().parse::<SearchStrategyType>(), Ok(*strategy));
        }
        assert_eq!(
            "NegaScout_W_Memory".parse::<SearchStrategyType>(),
            Ok(SearchStrategyType::NegaScoutWithMemory)
        );
        assert!("alpha-zero".parse::<SearchStrategyType>().is_err());
    }

    #[test]
    fn test_validate_only_checks_relevant_options() {
        let broken_uct = MonteCarloSearchOptions::default().with_max_simulations(0);
        let options = SearchOptions::new(SearchStrategyType::NegaMax).with_monte_carlo(broken_uct);
        assert!(options.validate().is_ok());

        let options = SearchOptions {
            strategy_type: SearchStrategyType::Uct,
            ..options
        };
        assert_eq!(options.validate(), Err(OptionsError::ZeroSimulations));
    }

    #[test]
    fn test_memory_flags() {
        assert!(SearchStrategyType::Mtd.uses_memory());
        assert!(!SearchStrategyType::NegaScout.uses_memory());
        assert!(SearchStrategyType::NegaScout.uses_scout_window());
        assert!(SearchStrategyType::Uct.is_monte_carlo());
    }
}
