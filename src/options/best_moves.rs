//! Selection of the most promising candidate moves at each node.

use crate::searchable::{perspective, TwoPlayerMove};

use super::OptionsError;

pub const DEFAULT_PERCENTAGE_BEST_MOVES: u32 = 100;
pub const DEFAULT_MIN_BEST_MOVES: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct BestMovesSearchOptions {
    /// Percentage of the ordered candidate list to keep.
    pub percentage_best_moves: u32,
    /// Never keep fewer than this many moves (when that many exist).
    pub min_best_moves: usize,
    /// Drop moves scoring more than this percentage below the best one.
    /// Zero disables the check.
    pub percent_less_than_best_threshold: u32,
}

impl Default for BestMovesSearchOptions {
    fn default() -> Self {
        Self {
            percentage_best_moves: DEFAULT_PERCENTAGE_BEST_MOVES,
            min_best_moves: DEFAULT_MIN_BEST_MOVES,
            percent_less_than_best_threshold: 0,
        }
    }
}

impl BestMovesSearchOptions {
    pub fn new(percentage_best_moves: u32, min_best_moves: usize, threshold: u32) -> Self {
        Self {
            percentage_best_moves,
            min_best_moves,
            percent_less_than_best_threshold: threshold,
        }
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.percentage_best_moves == 0 || self.percentage_best_moves > 100 {
            return Err(OptionsError::PercentageOutOfRange {
                name: "percentage_best_moves",
                value: self.percentage_best_moves,
            });
        }
        if self.percent_less_than_best_threshold > 100 {
            return Err(OptionsError::PercentageOutOfRange {
                name: "percent_less_than_best_threshold",
                value: self.percent_less_than_best_threshold,
            });
        }
        if self.min_best_moves == 0 {
            return Err(OptionsError::ZeroMinBestMoves);
        }
        Ok(())
    }

    /// Number of moves to keep out of `len` ordered candidates.
    pub fn num_to_keep(&self, len: usize) -> usize {
        let by_percentage = (len * self.percentage_best_moves as usize + 99) / 100;
        by_percentage.max(self.min_best_moves).min(len)
    }

    /// Trims an ordered (best first) candidate list in place.
    pub fn select<M: TwoPlayerMove>(&self, moves: &mut Vec<M>) {
        moves.truncate(self.num_to_keep(moves.len()));

        if self.percent_less_than_best_threshold == 0 || moves.len() <= self.min_best_moves {
            return;
        }

        let best = match moves.iter().map(mover_relative_value).max() {
            Some(best) => best as i64,
            None => return,
        };
        let margin = best.abs() * self.percent_less_than_best_threshold as i64 / 100;
        let cutoff = best - margin;

        let min_best_moves = self.min_best_moves;
        let mut index = 0;
        moves.retain(|mv| {
            index += 1;
            index <= min_best_moves || mover_relative_value(mv) as i64 >= cutoff
        });
    }
}

fn mover_relative_value<M: TwoPlayerMove>(mv: &M) -> i32 {
    perspective(mv.value(), mv.is_player1())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct ScoredMove {
        value: i32,
        player1: bool,
    }

    impl TwoPlayerMove for ScoredMove {
        fn value(&self) -> i32 {
            self.value
        }

        fn is_player1(&self) -> bool {
            self.player1
        }
    }

    fn ordered_moves(values: &[i32]) -> Vec<ScoredMove> {
        values
            .iter()
            .map(|&value| ScoredMove {
                value,
                player1: true,
            })
            .collect()
    }

    #[test]
    fn test_min_best_moves_is_respected() {
        let options = BestMovesSearchOptions::new(20, 3, 0);
        let mut moves = ordered_moves(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
        options.select(&mut moves);
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].value, 10);
    }

    #[test]
    fn test_full_percentage_keeps_everything() {
        let options = BestMovesSearchOptions::new(100, 3, 0);
        let original = ordered_moves(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let mut moves = original.clone();
        options.select(&mut moves);
        assert_eq!(moves, original);
    }

    #[test]
    fn test_percentage_rounds_up() {
        let options = BestMovesSearchOptions::new(50, 1, 0);
        assert_eq!(options.num_to_keep(5), 3);
        assert_eq!(options.num_to_keep(0), 0);
        assert_eq!(BestMovesSearchOptions::new(10, 4, 0).num_to_keep(2), 2);
    }

    #[test]
    fn test_threshold_drops_weak_moves() {
        let options = BestMovesSearchOptions::new(100, 2, 50);
        let mut moves = ordered_moves(&[100, 90, 60, 40, 10]);
        options.select(&mut moves);
        let kept: Vec<i32> = moves.iter().map(|m| m.value).collect();
        assert_eq!(kept, vec![100, 90, 60]);
    }

    #[test]
    fn test_threshold_uses_mover_perspective() {
        let options = BestMovesSearchOptions::new(100, 1, 10);
        let mut moves: Vec<ScoredMove> = [-100, -95, -20]
            .iter()
            .map(|&value| ScoredMove {
                value,
                player1: false,
            })
            .collect();
        options.select(&mut moves);
        assert_eq!(moves.len(), 2, "-20 is a poor move for player two");
    }

    #[test]
    fn test_validate() {
        assert!(BestMovesSearchOptions::default().validate().is_ok());
        assert!(BestMovesSearchOptions::new(0, 1, 0).validate().is_err());
        assert!(BestMovesSearchOptions::new(101, 1, 0).validate().is_err());
        assert_eq!(
            BestMovesSearchOptions::new(50, 0, 0).validate(),
            Err(OptionsError::ZeroMinBestMoves)
        );
    }
}
