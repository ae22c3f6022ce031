//! Options for the exhaustive (minimax family) strategies.

use crate::score_cache::DEFAULT_SCORE_CACHE_CAPACITY;
use crate::search_window::SearchWindow;
use crate::transposition::DEFAULT_TABLE_CAPACITY;

use super::OptionsError;

pub const DEFAULT_LOOK_AHEAD: u32 = 3;
pub const DEFAULT_MAX_QUIESCENT_DEPTH: u32 = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct BruteSearchOptions {
    /// Nominal number of plies to search.
    pub look_ahead: u32,
    pub alpha_beta: bool,
    /// Keep searching volatile positions past `look_ahead`.
    pub quiescence: bool,
    /// Hard limit on total plies when quiescence is on.
    pub max_quiescent_depth: u32,
    pub initial_window: SearchWindow,
    /// Memoize static evaluations in the score cache.
    pub use_score_cache: bool,
    pub transposition_capacity: usize,
    pub score_cache_capacity: usize,
}

impl Default for BruteSearchOptions {
    fn default() -> Self {
        Self {
            look_ahead: DEFAULT_LOOK_AHEAD,
            alpha_beta: true,
            quiescence: false,
            max_quiescent_depth: DEFAULT_MAX_QUIESCENT_DEPTH,
            initial_window: SearchWindow::default(),
            use_score_cache: true,
            transposition_capacity: DEFAULT_TABLE_CAPACITY,
            score_cache_capacity: DEFAULT_SCORE_CACHE_CAPACITY,
        }
    }
}

impl BruteSearchOptions {
    pub fn with_look_ahead(mut self, look_ahead: u32) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    pub fn with_alpha_beta(mut self, alpha_beta: bool) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    pub fn with_quiescence(mut self, quiescence: bool) -> Self {
        self.quiescence = quiescence;
        self
    }

    pub fn with_max_quiescent_depth(mut self, depth: u32) -> Self {
        self.max_quiescent_depth = depth;
        self
    }

    pub fn with_initial_window(mut self, window: SearchWindow) -> Self {
        self.initial_window = window;
        self
    }

    pub fn with_score_cache(mut self, use_score_cache: bool) -> Self {
        self.use_score_cache = use_score_cache;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.look_ahead == 0 {
            return Err(OptionsError::ZeroLookAhead);
        }
        if self.quiescence && self.max_quiescent_depth < self.look_ahead {
            return Err(OptionsError::QuiescentDepthTooLow {
                max_quiescent_depth: self.max_quiescent_depth,
                look_ahead: self.look_ahead,
            });
        }
        if self.initial_window.alpha >= self.initial_window.beta {
            return Err(OptionsError::EmptyWindow(self.initial_window));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BruteSearchOptions::default();
        assert_eq!(options.look_ahead, 3);
        assert!(options.alpha_beta);
        assert!(!options.quiescence);
        assert_eq!(options.max_quiescent_depth, 8);
        assert_eq!(options.initial_window, SearchWindow::default());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert_eq!(
            BruteSearchOptions::default().with_look_ahead(0).validate(),
            Err(OptionsError::ZeroLookAhead)
        );
        assert!(matches!(
            BruteSearchOptions::default()
                .with_look_ahead(5)
                .with_quiescence(true)
                .with_max_quiescent_depth(4)
                .validate(),
            Err(OptionsError::QuiescentDepthTooLow { .. })
        ));
        assert!(matches!(
            BruteSearchOptions::default()
                .with_initial_window(SearchWindow::new(3, 3))
                .validate(),
            Err(OptionsError::EmptyWindow(_))
        ));
    }
}
