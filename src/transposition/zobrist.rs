//! Zobrist random-number table.
//!
//! A game assigns every (location, state) pair a flat index and XORs the
//! table entry at that index into its key whenever the pair toggles. One extra
//! number is reserved for passing moves, so a pass changes the key even though
//! nothing on the board does.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::hash_key::HashKey;

#[derive(Error, Debug, PartialEq)]
pub enum HashError {
    #[error("state index {index} is out of range for a table of {size} numbers")]
    StateIndexOutOfRange { index: usize, size: usize },
}

pub struct ZobristHash {
    numbers: Vec<u64>,
    pass_number: u64,
    key: HashKey,
}

impl ZobristHash {
    /// Builds a table of `num_states` numbers. The same seed always produces
    /// the same table.
    pub fn new(num_states: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let numbers = (0..num_states).map(|_| rng.gen::<u64>()).collect();

        Self {
            numbers,
            pass_number: rng.gen::<u64>(),
            key: HashKey::default(),
        }
    }

    pub fn num_states(&self) -> usize {
        self.numbers.len()
    }

    pub fn random_number(&self, state_index: usize) -> Result<u64, HashError> {
        self.numbers
            .get(state_index)
            .copied()
            .ok_or(HashError::StateIndexOutOfRange {
                index: state_index,
                size: self.numbers.len(),
            })
    }

    /// Toggles the (location, state) pair at `state_index` in the current key.
    pub fn apply_state(&mut self, state_index: usize) -> Result<(), HashError> {
        let number = self.random_number(state_index)?;
        self.key.apply_move(number);
        Ok(())
    }

    pub fn apply_passing_move(&mut self) {
        self.key.apply_move(self.pass_number);
    }

    pub fn key(&self) -> HashKey {
        self.key
    }

    pub fn reset_key(&mut self) {
        self.key = HashKey::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_numbers_unique() {
        let zobrist = ZobristHash::new(512, 7);
        let mut seen = HashSet::new();

        for (i, num) in zobrist.numbers.iter().enumerate() {
            assert!(seen.insert(*num), "zobrist number {} ({}) repeats", i, num);
        }
        assert!(!seen.contains(&zobrist.pass_number));
    }

    #[test]
    fn test_same_seed_same_table() {
        let a = ZobristHash::new(64, 99);
        let b = ZobristHash::new(64, 99);
        let c = ZobristHash::new(64, 100);
        assert_eq!(a.numbers, b.numbers);
        assert_ne!(a.numbers, c.numbers);
    }

    #[test]
    fn test_make_then_undo_restores_key() {
        let mut zobrist = ZobristHash::new(9, 1);
        let start = zobrist.key();

        zobrist.apply_state(4).unwrap();
        zobrist.apply_state(8).unwrap();
        assert_ne!(zobrist.key(), start);

        zobrist.apply_state(8).unwrap();
        zobrist.apply_state(4).unwrap();
        assert_eq!(zobrist.key(), start);
    }

    #[test]
    fn test_passing_move_changes_key() {
        let mut zobrist = ZobristHash::new(9, 1);
        zobrist.apply_passing_move();
        assert_ne!(zobrist.key(), HashKey::default());
        zobrist.apply_passing_move();
        assert_eq!(zobrist.key(), HashKey::default());
    }

    #[test]
    fn test_out_of_range_index() {
        let mut zobrist = ZobristHash::new(9, 1);
        assert_eq!(
            zobrist.apply_state(9),
            Err(HashError::StateIndexOutOfRange { index: 9, size: 9 })
        );
        assert_eq!(zobrist.key(), HashKey::default());
    }
}
