//! Options for the Monte Carlo (UCT) strategy.

use super::OptionsError;

pub const DEFAULT_MAX_SIMULATIONS: u32 = 1000;
pub const DEFAULT_EXPLORE_EXPLOIT_RATIO: f64 = 1.0;
pub const DEFAULT_RANDOM_LOOK_AHEAD: u32 = 20;

/// Options for the UCT strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloSearchOptions {
    pub max_simulations: u32,
    /// Weight of the exploration term in UCB1. Zero means pure exploitation.
    pub explore_exploit_ratio: f64,
    /// Maximum plies in a random playout before the position is scored.
    pub random_look_ahead: u32,
    /// Fixes the playout random stream; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MonteCarloSearchOptions {
    fn default() -> Self {
        Self {
            max_simulations: DEFAULT_MAX_SIMULATIONS,
            explore_exploit_ratio: DEFAULT_EXPLORE_EXPLOIT_RATIO,
            random_look_ahead: DEFAULT_RANDOM_LOOK_AHEAD,
            seed: None,
        }
    }
}

impl MonteCarloSearchOptions {
    pub fn with_max_simulations(mut self, max_simulations: u32) -> Self {
        self.max_simulations = max_simulations;
        self
    }

    pub fn with_explore_exploit_ratio(mut self, ratio: f64) -> Self {
        self.explore_exploit_ratio = ratio;
        self
    }

    pub fn with_random_look_ahead(mut self, random_look_ahead: u32) -> Self {
        self.random_look_ahead = random_look_ahead;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_simulations == 0 {
            return Err(OptionsError::ZeroSimulations);
        }
        if !(self.explore_exploit_ratio >= 0.0) {
            return Err(OptionsError::NegativeExploreRatio(
                self.explore_exploit_ratio,
            ));
        }
        Ok(())
    }
}
