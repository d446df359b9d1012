//! One line of a run-length volume
//!
//! A [`RunRow`] keeps its runs sorted by `left`, pairwise disjoint and
//! non-touching: every insertion merges overlapping and adjacent runs, so a
//! covered interval always lies inside a single stored run.

use super::Run;
use crate::error::{RegionError, RegionResult};

/// Sorted, merged runs of one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRow {
    runs: Vec<Run>,
}

impl RunRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from the foreground spans of a line of booleans
    pub fn from_bools(line: &[bool]) -> Self {
        let mut runs = Vec::new();
        let mut start = None;
        for (x, &v) in line.iter().enumerate() {
            match (v, start) {
                (true, None) => start = Some(x),
                (false, Some(left)) => {
                    runs.push(Run { left, right: x - 1 });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(left) = start {
            runs.push(Run {
                left,
                right: line.len() - 1,
            });
        }
        RunRow { runs }
    }

    /// The stored runs in increasing order
    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Whether the row covers no position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of covered positions
    pub fn count(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }

    /// Mark `left..=right` as covered, merging with neighboring runs
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if `left > right`.
    pub fn set_range(&mut self, left: usize, right: usize) -> RegionResult<()> {
        if left > right {
            return Err(RegionError::InvalidParameters(format!(
                "run [{left}, {right}] is reversed"
            )));
        }
        self.insert(Run { left, right });
        Ok(())
    }

    /// Add a run, merging with neighboring runs
    pub(crate) fn insert(&mut self, run: Run) {
        let Run { left, right } = run;
        // Runs touching or overlapping left..=right occupy start..end
        let start = self.runs.partition_point(|r| r.right.saturating_add(1) < left);
        let end = self.runs.partition_point(|r| r.left <= right.saturating_add(1));
        let merged = if start < end {
            Run {
                left: left.min(self.runs[start].left),
                right: right.max(self.runs[end - 1].right),
            }
        } else {
            run
        };
        self.runs.drain(start..end);
        self.runs.insert(start, merged);
    }

    /// Whether position `x` is covered
    pub fn contains(&self, x: usize) -> bool {
        self.contains_range(x, x)
    }

    /// Whether every position of `left..=right` is covered
    pub fn contains_range(&self, left: usize, right: usize) -> bool {
        let k = self.runs.partition_point(|r| r.right < left);
        self.runs
            .get(k)
            .is_some_and(|r| r.left <= left && right <= r.right)
    }

    /// The stored runs sharing at least one position with `run`
    pub fn intersecting_runs(&self, run: Run) -> &[Run] {
        let start = self.runs.partition_point(|r| r.right < run.left);
        let end = self.runs.partition_point(|r| r.left <= run.right);
        &self.runs[start..end]
    }

    /// Positions covered by both rows
    pub fn intersection(&self, other: &RunRow) -> RunRow {
        let mut runs = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.runs.len() && j < other.runs.len() {
            let (a, b) = (self.runs[i], other.runs[j]);
            if let Some(shared) = a.intersect(&b) {
                runs.push(shared);
            }
            if a.right < b.right {
                i += 1;
            } else {
                j += 1;
            }
        }
        RunRow { runs }
    }

    /// Positions covered by `self` but not by `other`
    pub fn difference(&self, other: &RunRow) -> RunRow {
        let mut runs = Vec::new();
        for &run in &self.runs {
            let mut left = run.left;
            for cut in other.intersecting_runs(run) {
                if cut.left > left {
                    runs.push(Run {
                        left,
                        right: cut.left - 1,
                    });
                }
                left = cut.right + 1;
            }
            if left <= run.right {
                runs.push(Run {
                    left,
                    right: run.right,
                });
            }
        }
        RunRow { runs }
    }

    /// Gaps between the runs within `0..width`
    pub fn complement(&self, width: usize) -> RunRow {
        let mut runs = Vec::with_capacity(self.runs.len() + 1);
        let mut left = 0;
        for run in &self.runs {
            if run.left > left {
                runs.push(Run {
                    left,
                    right: run.left - 1,
                });
            }
            left = run.right + 1;
        }
        if left < width {
            runs.push(Run {
                left,
                right: width - 1,
            });
        }
        RunRow { runs }
    }
}
