//! Volume (3D) neighbor grid

use super::grid::{Half, NeighborGrid, ordered_offsets};
use voxmorph_core::{Connectivity, Shape};

/// Neighbor grid for 3D arrays
pub(crate) struct Grid3d {
    size_x: usize,
    size_y: usize,
    size_z: usize,
    /// `(dx, dy, dz, linear delta)` per offset, forward half first
    steps: Vec<(isize, isize, isize, isize)>,
    n_forward: usize,
}

impl Grid3d {
    pub(crate) fn new(shape: &Shape, conn: &Connectivity) -> Self {
        debug_assert_eq!(shape.ndim(), 3);
        let (ordered, n_forward) = ordered_offsets(conn);
        let steps = ordered
            .iter()
            .map(|o| (o[0], o[1], o[2], shape.offset_delta(o)))
            .collect();
        let dims = shape.dims();
        Grid3d {
            size_x: dims[0],
            size_y: dims[1],
            size_z: dims[2],
            steps,
            n_forward,
        }
    }
}

impl NeighborGrid for Grid3d {
    #[inline]
    fn for_each_neighbor<F: FnMut(usize)>(&mut self, index: usize, half: Half, mut f: F) {
        let x = (index % self.size_x) as isize;
        let rest = index / self.size_x;
        let y = (rest % self.size_y) as isize;
        let z = (rest / self.size_y) as isize;
        let (sx, sy, sz) = (
            self.size_x as isize,
            self.size_y as isize,
            self.size_z as isize,
        );
        for &(dx, dy, dz, delta) in &self.steps[half.range(self.n_forward, self.steps.len())] {
            let (nx, ny, nz) = (x + dx, y + dy, z + dz);
            if nx >= 0 && nx < sx && ny >= 0 && ny < sy && nz >= 0 && nz < sz {
                f((index as isize + delta) as usize);
            }
        }
    }
}
