//! Neighbor enumeration over linear indices
//!
//! The hybrid engine works on linear (raster) indices. A [`NeighborGrid`]
//! turns an index plus a half of the connectivity into the in-bounds
//! neighbor indices; positions outside the array are skipped, never padded.
//! [`GridNd`] handles any rank; the planar and volume grids are fixed-rank
//! versions of the same contract.

use std::ops::Range;
use voxmorph_core::{Connectivity, Shape};

/// Which offsets of a connectivity to visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Half {
    /// Offsets preceding the position in raster order
    Forward,
    /// Offsets following the position in raster order
    Backward,
    /// Every offset
    All,
}

impl Half {
    /// Index range into an offset table stored forward-half first
    #[inline]
    pub(crate) fn range(self, n_forward: usize, n_total: usize) -> Range<usize> {
        match self {
            Half::Forward => 0..n_forward,
            Half::Backward => n_forward..n_total,
            Half::All => 0..n_total,
        }
    }
}

/// In-bounds neighbor enumeration for one array shape
pub(crate) trait NeighborGrid {
    /// Call `f` with the linear index of every in-bounds neighbor of `index`
    /// in the given half
    fn for_each_neighbor<F: FnMut(usize)>(&mut self, index: usize, half: Half, f: F);
}

/// Offsets of a connectivity, forward half first, and the size of that half
pub(crate) fn ordered_offsets(conn: &Connectivity) -> (Vec<&[isize]>, usize) {
    let mut offsets: Vec<&[isize]> = conn.forward_offsets().collect();
    let n_forward = offsets.len();
    offsets.extend(conn.backward_offsets());
    (offsets, n_forward)
}

/// Neighbor grid for arrays of any rank
pub(crate) struct GridNd<'a> {
    shape: &'a Shape,
    /// Flat offset table, `ndim` entries per offset
    offsets: Vec<isize>,
    /// Linear index delta of each offset
    deltas: Vec<isize>,
    n_forward: usize,
    coords: Vec<usize>,
}

impl<'a> GridNd<'a> {
    pub(crate) fn new(shape: &'a Shape, conn: &Connectivity) -> Self {
        let (ordered, n_forward) = ordered_offsets(conn);
        let deltas = ordered.iter().map(|o| shape.offset_delta(o)).collect();
        let offsets = ordered.into_iter().flatten().copied().collect();
        GridNd {
            shape,
            offsets,
            deltas,
            n_forward,
            coords: vec![0; shape.ndim()],
        }
    }
}

impl NeighborGrid for GridNd<'_> {
    fn for_each_neighbor<F: FnMut(usize)>(&mut self, index: usize, half: Half, mut f: F) {
        self.shape.unravel_into(index, &mut self.coords);
        let ndim = self.coords.len();
        for k in half.range(self.n_forward, self.deltas.len()) {
            let off = &self.offsets[k * ndim..(k + 1) * ndim];
            let inside = off
                .iter()
                .zip(&self.coords)
                .zip(self.shape.dims())
                .all(|((&o, &c), &d)| {
                    let q = c as isize + o;
                    q >= 0 && (q as usize) < d
                });
            if inside {
                f((index as isize + self.deltas[k]) as usize);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmorph_core::Adjacency;

    fn collect<G: NeighborGrid>(grid: &mut G, index: usize, half: Half) -> Vec<usize> {
        let mut out = Vec::new();
        grid.for_each_neighbor(index, half, |j| out.push(j));
        out.sort_unstable();
        out
    }

    #[test]
    fn test_corner_skips_outside() {
        let shape = Shape::new(&[3, 3]).unwrap();
        let mut grid = GridNd::new(&shape, &Connectivity::eight());
        assert_eq!(collect(&mut grid, 0, Half::All), vec![1, 3, 4]);
        assert_eq!(collect(&mut grid, 0, Half::Forward), Vec::<usize>::new());
        assert_eq!(collect(&mut grid, 8, Half::Backward), Vec::<usize>::new());
    }

    #[test]
    fn test_forward_neighbors_precede() {
        let shape = Shape::new(&[4, 3, 3, 2]).unwrap();
        let conn = Connectivity::new(4, Adjacency::Full);
        let mut grid = GridNd::new(&shape, &conn);
        for i in 0..shape.len() {
            for j in collect(&mut grid, i, Half::Forward) {
                assert!(j < i);
            }
            for j in collect(&mut grid, i, Half::Backward) {
                assert!(j > i);
            }
        }
    }
}
