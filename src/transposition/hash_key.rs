//! Incrementally maintained position keys.
//!
//! A key is the XOR of one random number per (location, state) pair that is
//! currently occupied. Making a move XORs its number in, undoing it XORs the
//! same number out again, so the key always identifies the position no matter
//! which move order reached it.

use std::fmt;

use smallvec::SmallVec;

/// 64-bit position key built by XOR-ing random numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HashKey {
    key: u64,
}

impl HashKey {
    pub fn new(key: u64) -> Self {
        Self { key }
    }

    /// XORs `special_number` into the key. Applying the same number twice
    /// leaves the key unchanged.
    #[inline(always)]
    pub fn apply_move(&mut self, special_number: u64) {
        self.key ^= special_number;
    }

    pub fn matches(&self, key: u64) -> bool {
        self.key == key
    }

    pub fn value(&self) -> u64 {
        self.key
    }
}

impl From<u64> for HashKey {
    fn from(key: u64) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:b}", self.key)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct KeyChange {
    label: String,
    special_number: u64,
}

/// A `HashKey` that remembers every number applied to it, for diagnosing
/// hash mismatches in a collaborator's make/undo code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoricalHashKey {
    key: HashKey,
    history: SmallVec<[KeyChange; 16]>,
}

impl HistoricalHashKey {
    pub fn new(key: u64) -> Self {
        Self {
            key: HashKey::new(key),
            history: SmallVec::new(),
        }
    }

    /// Applies `special_number` and records it under `label`, typically the
    /// location the move touched.
    pub fn apply_move(&mut self, label: impl Into<String>, special_number: u64) {
        self.key.apply_move(special_number);
        self.history.push(KeyChange {
            label: label.into(),
            special_number,
        });
    }

    /// Returns the key the history started from, by XOR-ing every recorded
    /// number back out.
    pub fn undo_key_history(&self) -> HashKey {
        let mut ancestor = self.key;
        for change in self.history.iter().rev() {
            ancestor.apply_move(change.special_number);
        }
        ancestor
    }

    pub fn key(&self) -> HashKey {
        self.key
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn matches(&self, key: u64) -> bool {
        self.key.matches(key)
    }
}

impl fmt::Display for HistoricalHashKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.key)?;
        for change in &self.history {
            writeln!(f, "  {} -> {:b}", change.label, change.special_number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_same_number_twice_restores_key() {
        let mut key = HashKey::new(0);
        key.apply_move(0xDEAD_BEEF_1234_5678);
        assert_ne!(key.value(), 0);
        key.apply_move(0xDEAD_BEEF_1234_5678);
        assert_eq!(key.value(), 0, "xor is its own inverse");
    }

    #[test]
    fn test_move_order_does_not_matter() {
        let mut a = HashKey::new(17);
        let mut b = HashKey::new(17);
        a.apply_move(3);
        a.apply_move(900);
        b.apply_move(900);
        b.apply_move(3);
        assert_eq!(a, b);
        assert!(a.matches(b.value()));
    }

    #[test]
    fn test_display_is_binary() {
        assert_eq!(HashKey::new(5).to_string(), "101");
    }

    #[test]
    fn test_undo_key_history_returns_ancestor() {
        let mut key = HistoricalHashKey::new(42);
        key.apply_move("a1", 0x1111);
        key.apply_move("b2", 0xF0F0_0000);
        key.apply_move("a1", 0x1111);

        assert_eq!(key.history_len(), 3);
        assert_eq!(key.undo_key_history(), HashKey::new(42));
        assert!(key.matches(42 ^ 0xF0F0_0000));
    }

    #[test]
    fn test_historical_display_lists_labels() {
        let mut key = HistoricalHashKey::new(0);
        key.apply_move("c3", 2);
        let shown = key.to_string();
        assert!(shown.starts_with("10\n"), "{}", shown);
        assert!(shown.contains("c3 -> 10"), "{}", shown);
    }
}
