//! Bounded transposition table for memory-enhanced searches.
//!
//! Entries hold a lower and an upper bound on the value of a position for the
//! side to move, the remaining depth those bounds were computed with, and the
//! move that produced them. The table keeps at most `capacity` positions and
//! evicts the least recently used one when full.

use std::cmp::{max, min};
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;

use super::hash_key::HashKey;
use crate::search_window::{SearchWindow, INFINITY};

pub const DEFAULT_TABLE_CAPACITY: usize = 100_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Entry<M: Clone> {
    pub lower_value: i32,
    pub upper_value: i32,
    pub depth: u32,
    pub best_move: Option<M>,
}

impl<M: Clone> Entry<M> {
    /// An entry that knows nothing yet: `(-INFINITY, INFINITY)`.
    pub fn unbounded(depth: u32, best_move: Option<M>) -> Self {
        Self {
            lower_value: -INFINITY,
            upper_value: INFINITY,
            depth,
            best_move,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.lower_value == self.upper_value
    }

    /// Narrows the bounds with the result of a fail-soft search of `window`.
    fn tighten(&mut self, window: SearchWindow, value: i32) {
        if value <= window.alpha {
            self.upper_value = min(self.upper_value, value);
        } else if value >= window.beta {
            self.lower_value = max(self.lower_value, value);
        } else {
            self.lower_value = value;
            self.upper_value = value;
        }
    }
}

/// Result of looking a position up.
#[derive(Clone, Debug, PartialEq)]
pub enum Probe<M> {
    /// The stored bounds settle the value for the requested window.
    Hit { value: i32, best_move: Option<M> },
    /// An entry exists but is too shallow or too loose; its move is still a
    /// good first guess.
    NearHit { best_move: Option<M> },
    Miss,
}

impl<M> Probe<M> {
    pub fn best_move(&self) -> Option<&M> {
        match self {
            Probe::Hit { best_move, .. } | Probe::NearHit { best_move } => best_move.as_ref(),
            Probe::Miss => None,
        }
    }
}

pub struct TranspositionTable<M: Clone> {
    table: LruCache<HashKey, Entry<M>>,
    hits: usize,
    near_hits: usize,
    misses: usize,
}

impl<M: Clone> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_CAPACITY)
    }
}

impl<M: Clone> TranspositionTable<M> {
    pub fn new(capacity: usize) -> Self {
        Self {
            table: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            near_hits: 0,
            misses: 0,
        }
    }

    /// Returns the entry for `key` and marks it most recently used. Counts a
    /// hit or a miss without looking at the entry's depth or bounds.
    pub fn get(&mut self, key: &HashKey) -> Option<&Entry<M>> {
        let entry = self.table.get(key);
        if entry.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        entry
    }

    /// Inserts or replaces the entry for `key`, evicting the least recently
    /// used entry when the table is full.
    pub fn put(&mut self, key: HashKey, entry: Entry<M>) {
        self.table.put(key, entry);
    }

    /// Decides whether `entry` can stand in for a search of `depth` plies with
    /// `window`, and counts the outcome.
    pub fn entry_exists(
        &mut self,
        entry: Option<&Entry<M>>,
        depth: u32,
        window: SearchWindow,
    ) -> Probe<M> {
        let entry = match entry {
            Some(entry) => entry,
            None => {
                self.misses += 1;
                return Probe::Miss;
            }
        };
        let best_move = entry.best_move.clone();

        if entry.depth < depth {
            self.near_hits += 1;
            return Probe::NearHit { best_move };
        }

        if entry.upper_value <= window.alpha || entry.is_exact() {
            self.hits += 1;
            return Probe::Hit {
                value: entry.upper_value,
                best_move,
            };
        }
        if entry.lower_value >= window.beta {
            self.hits += 1;
            return Probe::Hit {
                value: entry.lower_value,
                best_move,
            };
        }

        self.near_hits += 1;
        Probe::NearHit { best_move }
    }

    pub fn probe(&mut self, key: &HashKey, depth: u32, window: SearchWindow) -> Probe<M> {
        let entry = self.table.get(key).cloned();
        self.entry_exists(entry.as_ref(), depth, window)
    }

    /// Records the fail-soft `value` of a search of `window` at `depth`.
    ///
    /// An existing entry searched to the same depth is narrowed rather than
    /// replaced. If the narrowed bounds cross, the new result wins.
    pub fn store(
        &mut self,
        key: HashKey,
        depth: u32,
        window: SearchWindow,
        value: i32,
        best_move: Option<M>,
    ) {
        if let Some(existing) = self.table.get_mut(&key) {
            if existing.depth == depth {
                existing.tighten(window, value);
                if existing.lower_value <= existing.upper_value {
                    if best_move.is_some() {
                        existing.best_move = best_move;
                    }
                    return;
                }
            }
        }

        let mut entry = Entry::unbounded(depth, best_move);
        entry.tighten(window, value);
        self.table.put(key, entry);
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.near_hits = 0;
        self.misses = 0;
    }

    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    pub fn near_cache_hits(&self) -> usize {
        self.near_hits
    }

    pub fn cache_misses(&self) -> usize {
        self.misses
    }

    pub fn num_entries(&self) -> usize {
        self.table.len()
    }

    pub fn capacity(&self) -> usize {
        self.table.cap().get()
    }
}

impl<M: Clone> fmt::Display for TranspositionTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries={} hits={} near_hits={} misses={}",
            self.num_entries(),
            self.hits,
            self.near_hits,
            self.misses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u64) -> HashKey {
        HashKey::new(n)
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut table = TranspositionTable::<u8>::new(3);
        for n in 0..3 {
            table.put(key(n), Entry::unbounded(1, None));
        }
        // touch 0 so that 1 becomes the oldest
        assert!(table.get(&key(0)).is_some());
        table.put(key(3), Entry::unbounded(1, None));

        assert_eq!(table.num_entries(), 3);
        assert!(table.get(&key(1)).is_none(), "oldest entry should be evicted");
        assert!(table.get(&key(0)).is_some());
        assert!(table.get(&key(3)).is_some());
    }

    #[test]
    fn test_shallow_entry_is_near_hit() {
        let mut table = TranspositionTable::new(10);
        table.store(key(1), 3, SearchWindow::default(), 40, Some('a'));

        assert_eq!(
            table.probe(&key(1), 3, SearchWindow::default()),
            Probe::Hit {
                value: 40,
                best_move: Some('a')
            }
        );
        assert_eq!(
            table.probe(&key(1), 4, SearchWindow::default()),
            Probe::NearHit {
                best_move: Some('a')
            }
        );
        assert_eq!(table.probe(&key(2), 1, SearchWindow::default()), Probe::Miss);

        assert_eq!(table.cache_hits(), 1);
        assert_eq!(table.near_cache_hits(), 1);
        assert_eq!(table.cache_misses(), 1);
    }

    #[test]
    fn test_fail_high_stores_lower_bound() {
        let mut table = TranspositionTable::<u8>::new(10);
        table.store(key(1), 2, SearchWindow::new(0, 10), 25, None);

        let entry = table.get(&key(1)).cloned().unwrap();
        assert_eq!(entry.lower_value, 25);
        assert_eq!(entry.upper_value, INFINITY);

        // usable only when the caller's beta is at or below the bound
        assert!(matches!(
            table.probe(&key(1), 2, SearchWindow::new(0, 20)),
            Probe::Hit { value: 25, .. }
        ));
        assert!(matches!(
            table.probe(&key(1), 2, SearchWindow::new(0, 30)),
            Probe::NearHit { .. }
        ));
    }

    #[test]
    fn test_fail_low_stores_upper_bound() {
        let mut table = TranspositionTable::<u8>::new(10);
        table.store(key(1), 2, SearchWindow::new(0, 10), -5, None);

        assert!(matches!(
            table.probe(&key(1), 2, SearchWindow::new(-3, 10)),
            Probe::Hit { value: -5, .. }
        ));
        assert!(matches!(
            table.probe(&key(1), 2, SearchWindow::new(-10, 10)),
            Probe::NearHit { .. }
        ));
    }

    #[test]
    fn test_same_depth_bounds_are_intersected() {
        let mut table = TranspositionTable::<u8>::new(10);
        table.store(key(1), 2, SearchWindow::null_window(5), 7, None);
        table.store(key(1), 2, SearchWindow::null_window(9), 8, Some(3));

        let entry = table.get(&key(1)).cloned().unwrap();
        assert_eq!((entry.lower_value, entry.upper_value), (7, 8));
        assert_eq!(entry.best_move, Some(3));

        table.store(key(1), 3, SearchWindow::default(), 1, None);
        let entry = table.get(&key(1)).cloned().unwrap();
        assert_eq!((entry.lower_value, entry.upper_value, entry.depth), (1, 1, 3));
    }

    #[test]
    fn test_get_counts_hits_and_misses() {
        let mut table = TranspositionTable::<u8>::new(10);
        table.put(key(1), Entry::unbounded(2, Some(4)));

        assert_eq!(table.get(&key(1)).and_then(|entry| entry.best_move), Some(4));
        assert!(table.get(&key(2)).is_none());
        assert_eq!(table.cache_hits(), 1);
        assert_eq!(table.cache_misses(), 1);
        assert_eq!(table.near_cache_hits(), 0);
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut table = TranspositionTable::<u8>::new(10);
        table.store(key(1), 1, SearchWindow::default(), 0, None);
        table.probe(&key(1), 1, SearchWindow::default());
        table.clear();
        assert_eq!(table.num_entries(), 0);
        assert_eq!(table.cache_hits(), 0);
        assert_eq!(table.capacity(), 10);
    }
}
