//! Closed intervals along the fastest axis

/// A closed interval `[left, right]` of foreground positions on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Run {
    /// First covered position
    pub left: usize,
    /// Last covered position (inclusive)
    pub right: usize,
}

impl Run {
    /// Create a run covering `left..=right`
    ///
    /// # Panics
    ///
    /// Panics if `left > right`.
    pub fn new(left: usize, right: usize) -> Self {
        assert!(left <= right, "run [{left}, {right}] is reversed");
        Run { left, right }
    }

    /// Number of covered positions
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }

    /// Always false: a run covers at least one position
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `x` lies inside the run
    #[inline]
    pub fn contains(&self, x: usize) -> bool {
        self.left <= x && x <= self.right
    }

    /// Whether the runs share at least one position
    #[inline]
    pub fn overlaps(&self, other: &Run) -> bool {
        self.left <= other.right && other.left <= self.right
    }

    /// The shared positions of two runs
    pub fn intersect(&self, other: &Run) -> Option<Run> {
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        (left <= right).then_some(Run { left, right })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_basics() {
        let r = Run::new(3, 7);
        assert_eq!(r.len(), 5);
        assert!(r.contains(3) && r.contains(7));
        assert!(!r.contains(8));
    }

    #[test]
    fn test_intersect() {
        let a = Run::new(2, 6);
        assert_eq!(a.intersect(&Run::new(5, 9)), Some(Run::new(5, 6)));
        assert_eq!(a.intersect(&Run::new(7, 9)), None);
        assert!(a.overlaps(&Run::new(6, 6)));
        assert!(!a.overlaps(&Run::new(0, 1)));
    }

    #[test]
    #[should_panic]
    fn test_reversed_run_panics() {
        let _ = Run::new(4, 3);
    }
}
