//! The (alpha, beta) interval of scores a search still cares about.

use std::fmt;

/// Larger than any score a position can be given.
pub const INFINITY: i32 = 10_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    pub alpha: i32,
    pub beta: i32,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::new(-INFINITY, INFINITY)
    }
}

impl SearchWindow {
    pub fn new(alpha: i32, beta: i32) -> Self {
        Self { alpha, beta }
    }

    /// Zero-width window just below `beta`, as used by test searches.
    pub fn null_window(beta: i32) -> Self {
        Self::new(beta - 1, beta)
    }

    /// The window as seen by the opponent: `(-beta, -alpha)`.
    #[inline(always)]
    pub fn negate_and_swap(&self) -> Self {
        Self::new(-self.beta, -self.alpha)
    }

    pub fn extent(&self) -> i64 {
        self.beta as i64 - self.alpha as i64
    }

    pub fn mid_point(&self) -> i32 {
        ((self.alpha as i64 + self.beta as i64) / 2) as i32
    }

    /// True when `value` falls outside the open interval, meaning the rest of
    /// the siblings can be skipped.
    pub fn is_outside(&self, value: i32) -> bool {
        value <= self.alpha || value >= self.beta
    }

    pub fn is_null(&self) -> bool {
        self.extent() <= 1
    }
}

impl fmt::Display for SearchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.alpha, self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full_window() {
        let window = SearchWindow::default();
        assert_eq!(window.alpha, -INFINITY);
        assert_eq!(window.beta, INFINITY);
        assert_eq!(window.mid_point(), 0);
        assert_eq!(window.extent(), 2 * INFINITY as i64);
    }

    #[test]
    fn test_negate_and_swap() {
        let window = SearchWindow::new(-3, 10);
        assert_eq!(window.negate_and_swap(), SearchWindow::new(-10, 3));
        assert_eq!(window.negate_and_swap().negate_and_swap(), window);
    }

    #[test]
    fn test_null_window() {
        let window = SearchWindow::null_window(5);
        assert_eq!(window, SearchWindow::new(4, 5));
        assert!(window.is_null());
        assert!(window.is_outside(4));
        assert!(window.is_outside(5));
    }

    #[test]
    fn test_is_outside() {
        let window = SearchWindow::new(0, 10);
        assert!(!window.is_outside(5));
        assert!(window.is_outside(0));
        assert!(window.is_outside(11));
        assert_eq!(window.to_string(), "[0, 10]");
    }
}
