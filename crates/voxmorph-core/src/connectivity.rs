//! Connectivity - neighbor offsets for N-dimensional arrays
//!
//! A [`Connectivity`] is an immutable set of non-zero offset vectors. The set
//! is split into a *forward* half (offsets that point to positions preceding
//! the current one in raster order) and a *backward* half (offsets pointing to
//! positions that follow it). Since dimension 0 varies fastest, an offset
//! precedes the origin when its nonzero coordinate on the slowest axis is
//! negative.
//!
//! # Examples
//!
//! ```
//! use voxmorph_core::Connectivity;
//!
//! let c4 = Connectivity::four();
//! assert_eq!(c4.len(), 4);
//! assert_eq!(c4.forward_offsets().count(), 2);
//!
//! let c26 = Connectivity::twenty_six();
//! assert_eq!(c26.len(), 26);
//! assert!(Connectivity::six().is_subset_of(&c26));
//! ```

use crate::error::{Error, Result};

/// Adjacency family for [`Connectivity::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Adjacency {
    /// Neighbors share a face: one coordinate differs by one
    /// (4-adjacency in 2D, 6-adjacency in 3D)
    #[default]
    Face,
    /// Neighbors share at least a corner: every coordinate differs by at
    /// most one (8-adjacency in 2D, 26-adjacency in 3D)
    Full,
}

/// Immutable neighbor-offset set for a fixed dimensionality
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connectivity {
    ndim: usize,
    /// Offsets stored flat, `ndim` coordinates each
    offsets: Vec<isize>,
}

impl Connectivity {
    /// Standard face or full adjacency in `ndim` dimensions
    ///
    /// Offsets are listed in raster order of the surrounding `3^ndim` cube.
    ///
    /// # Panics
    ///
    /// Panics if `ndim == 0`.
    pub fn new(ndim: usize, adjacency: Adjacency) -> Self {
        assert!(ndim > 0, "connectivity needs at least one dimension");

        let mut offsets = Vec::new();
        let mut cube = vec![-1isize; ndim];
        loop {
            let nonzero = cube.iter().filter(|&&c| c != 0).count();
            let keep = match adjacency {
                Adjacency::Face => nonzero == 1,
                Adjacency::Full => nonzero > 0,
            };
            if keep {
                offsets.extend_from_slice(&cube);
            }

            // Odometer increment, axis 0 fastest
            let mut axis = 0;
            while axis < ndim {
                if cube[axis] < 1 {
                    cube[axis] += 1;
                    break;
                }
                cube[axis] = -1;
                axis += 1;
            }
            if axis == ndim {
                break;
            }
        }

        Connectivity { ndim, offsets }
    }

    /// 1D connectivity: left and right neighbors
    pub fn line() -> Self {
        Self::new(1, Adjacency::Face)
    }

    /// 2D 4-adjacency
    pub fn four() -> Self {
        Self::new(2, Adjacency::Face)
    }

    /// 2D 8-adjacency
    pub fn eight() -> Self {
        Self::new(2, Adjacency::Full)
    }

    /// 3D 6-adjacency
    pub fn six() -> Self {
        Self::new(3, Adjacency::Face)
    }

    /// 3D 26-adjacency
    pub fn twenty_six() -> Self {
        Self::new(3, Adjacency::Full)
    }

    /// Build a connectivity from explicit offsets
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConnectivity` if `ndim` is zero, an offset has
    /// the wrong length, is the zero vector, is duplicated, or its negation
    /// is missing. Symmetry is required because forward and backward scans
    /// must see the same neighbor relation from both sides.
    pub fn from_offsets(ndim: usize, offsets: &[Vec<isize>]) -> Result<Self> {
        if ndim == 0 {
            return Err(Error::InvalidConnectivity(
                "dimensionality must be positive".to_string(),
            ));
        }
        for off in offsets {
            if off.len() != ndim {
                return Err(Error::InvalidConnectivity(format!(
                    "offset {off:?} has {} coordinates, expected {ndim}",
                    off.len()
                )));
            }
            if off.iter().all(|&c| c == 0) {
                return Err(Error::InvalidConnectivity(
                    "zero offset is not a neighbor".to_string(),
                ));
            }
        }
        for (i, off) in offsets.iter().enumerate() {
            if offsets[..i].contains(off) {
                return Err(Error::InvalidConnectivity(format!(
                    "duplicate offset {off:?}"
                )));
            }
            let negated: Vec<isize> = off.iter().map(|c| -c).collect();
            if !offsets.contains(&negated) {
                return Err(Error::InvalidConnectivity(format!(
                    "offset {off:?} has no opposite"
                )));
            }
        }

        Ok(Connectivity {
            ndim,
            offsets: offsets.iter().flatten().copied().collect(),
        })
    }

    /// Dimensionality of the offsets
    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    /// Number of offsets
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() / self.ndim
    }

    /// Whether the connectivity has no offsets
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// All offsets
    pub fn offsets(&self) -> std::slice::ChunksExact<'_, isize> {
        self.offsets.chunks_exact(self.ndim)
    }

    /// Offsets pointing to positions that precede the origin in raster order
    pub fn forward_offsets(&self) -> impl Iterator<Item = &[isize]> + '_ {
        self.offsets().filter(|o| precedes(o))
    }

    /// Offsets pointing to positions that follow the origin in raster order
    pub fn backward_offsets(&self) -> impl Iterator<Item = &[isize]> + '_ {
        self.offsets().filter(|o| !precedes(o))
    }

    /// Enumerate `pos + offset` for every offset, without bounds checking
    ///
    /// Results may fall outside the array; callers discard those.
    pub fn neighbors<'a>(&'a self, pos: &'a [usize]) -> impl Iterator<Item = Vec<isize>> + 'a {
        self.offsets().map(move |off| {
            pos.iter()
                .zip(off)
                .map(|(&p, &o)| p as isize + o)
                .collect()
        })
    }

    /// Whether every offset of `self` is also an offset of `other`
    pub fn is_subset_of(&self, other: &Connectivity) -> bool {
        self.ndim == other.ndim && self.offsets().all(|o| other.offsets().any(|p| p == o))
    }
}

/// Whether an offset points to a position preceding the origin in raster
/// order: its nonzero coordinate on the slowest axis is negative.
#[inline]
pub fn precedes(offset: &[isize]) -> bool {
    offset
        .iter()
        .rev()
        .find(|&&c| c != 0)
        .is_some_and(|&c| c < 0)
}
