//! Progress counters shared with whoever is waiting on a search.
//!
//! A strategy hands out an `Arc<SearchProgress>` so a UI or watchdog thread
//! can poll how far the search has come and ask it to stop early.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct SearchProgress {
    moves_considered: AtomicUsize,
    percent_done: AtomicUsize,
    interrupted: AtomicBool,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn moves_considered(&self) -> usize {
        self.moves_considered.load(Ordering::SeqCst)
    }

    pub fn percent_done(&self) -> usize {
        self.percent_done.load(Ordering::SeqCst)
    }

    /// Asks the running search to stop and return the best move found so far.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    /// Clears all counters and the interrupt flag.
    pub fn reset(&self) {
        self.moves_considered.store(0, Ordering::SeqCst);
        self.percent_done.store(0, Ordering::SeqCst);
        self.interrupted.store(false, Ordering::SeqCst);
    }

    pub(crate) fn increment_moves_considered(&self) {
        self.moves_considered.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn set_percent_done(&self, done: usize, total: usize) {
        if total > 0 {
            self.percent_done
                .store((100 * done / total).min(100), Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_interrupt_from_another_thread() {
        let progress = Arc::new(SearchProgress::new());
        let handle = {
            let progress = Arc::clone(&progress);
            thread::spawn(move || progress.interrupt())
        };
        handle.join().unwrap();
        assert!(progress.is_interrupted());

        progress.reset();
        assert!(!progress.is_interrupted());
    }

    #[test]
    fn test_percent_done_is_clamped() {
        let progress = SearchProgress::new();
        progress.set_percent_done(3, 4);
        assert_eq!(progress.percent_done(), 75);
        progress.set_percent_done(9, 4);
        assert_eq!(progress.percent_done(), 100);
        progress.set_percent_done(1, 0);
        assert_eq!(progress.percent_done(), 100);
    }
}
