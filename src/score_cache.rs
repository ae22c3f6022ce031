//! LRU cache of raw static evaluations, keyed by position.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::transposition::HashKey;

pub const DEFAULT_SCORE_CACHE_CAPACITY: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub score: i32,
}

pub struct ScoreCache {
    cache: LruCache<HashKey, ScoreEntry>,
    hits: usize,
    misses: usize,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_CACHE_CAPACITY)
    }
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &HashKey) -> Option<ScoreEntry> {
        match self.cache.get(key) {
            Some(entry) => {
                self.hits += 1;
                Some(*entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn put(&mut self, key: HashKey, entry: ScoreEntry) {
        self.cache.put(key, entry);
    }

    /// Returns the cached score for `key`, computing and caching it on a miss.
    pub fn get_or_insert_with<F: FnOnce() -> i32>(&mut self, key: HashKey, score: F) -> i32 {
        if let Some(entry) = self.get(&key) {
            return entry.score;
        }
        let score = score();
        self.put(key, ScoreEntry { score });
        score
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    pub fn cache_misses(&self) -> usize {
        self.misses
    }

    pub fn num_entries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_plus_one_evicts_first_inserted() {
        let capacity = 4;
        let mut cache = ScoreCache::new(capacity);
        for n in 0..=capacity as u64 {
            cache.put(HashKey::new(n), ScoreEntry { score: n as i32 });
        }

        assert_eq!(cache.num_entries(), capacity);
        assert_eq!(cache.get(&HashKey::new(0)), None);
        for n in 1..=capacity as u64 {
            assert_eq!(
                cache.get(&HashKey::new(n)),
                Some(ScoreEntry { score: n as i32 })
            );
        }
        assert_eq!(cache.cache_misses(), 1);
        assert_eq!(cache.cache_hits(), capacity);
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let mut cache = ScoreCache::new(8);
        let mut calls = 0;
        for _ in 0..3 {
            let score = cache.get_or_insert_with(HashKey::new(11), || {
                calls += 1;
                -42
            });
            assert_eq!(score, -42);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.cache_hits(), 2);
        assert_eq!(cache.cache_misses(), 1);
    }
}
