//! Planar (2D) neighbor grid
//!
//! Same contract as [`GridNd`](super::grid::GridNd) with the coordinate
//! decomposition reduced to one division.

use super::grid::{Half, NeighborGrid, ordered_offsets};
use voxmorph_core::{Connectivity, Shape};

/// Neighbor grid for 2D arrays
pub(crate) struct Grid2d {
    width: usize,
    height: usize,
    /// `(dx, dy, linear delta)` per offset, forward half first
    steps: Vec<(isize, isize, isize)>,
    n_forward: usize,
}

impl Grid2d {
    pub(crate) fn new(shape: &Shape, conn: &Connectivity) -> Self {
        debug_assert_eq!(shape.ndim(), 2);
        let (ordered, n_forward) = ordered_offsets(conn);
        let width = shape.dims()[0];
        let steps = ordered
            .iter()
            .map(|o| (o[0], o[1], o[0] + o[1] * width as isize))
            .collect();
        Grid2d {
            width,
            height: shape.dims()[1],
            steps,
            n_forward,
        }
    }
}

impl NeighborGrid for Grid2d {
    #[inline]
    fn for_each_neighbor<F: FnMut(usize)>(&mut self, index: usize, half: Half, mut f: F) {
        let x = (index % self.width) as isize;
        let y = (index / self.width) as isize;
        let (w, h) = (self.width as isize, self.height as isize);
        for &(dx, dy, delta) in &self.steps[half.range(self.n_forward, self.steps.len())] {
            let (nx, ny) = (x + dx, y + dy);
            if nx >= 0 && nx < w && ny >= 0 && ny < h {
                f((index as isize + delta) as usize);
            }
        }
    }
}
