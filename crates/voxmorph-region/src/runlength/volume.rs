//! Sparse binary images and volumes stored as runs
//!
//! A [`RunLengthVolume`] keeps one [`RunRow`] per line along axis 0, keyed by
//! the line's `(z, y)` coordinates so that row iteration follows raster
//! order. Lines without foreground have no entry.

use super::{Run, RunRow};
use crate::error::{RegionError, RegionResult, check_same_dims};
use std::collections::BTreeMap;
use voxmorph_core::{Array, Shape};

/// Run-length encoded binary image (2D) or volume (3D)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLengthVolume {
    shape: Shape,
    rows: BTreeMap<(usize, usize), RunRow>,
}

impl RunLengthVolume {
    /// Create an empty volume
    ///
    /// # Errors
    ///
    /// Returns `RegionError::UnsupportedDimension` unless `dims` has two or
    /// three extents, or a core error if an extent is zero.
    pub fn new(dims: &[usize]) -> RegionResult<Self> {
        if !(2..=3).contains(&dims.len()) {
            return Err(RegionError::UnsupportedDimension {
                expected: "2 or 3",
                actual: dims.len(),
            });
        }
        Ok(Self::empty(Shape::new(dims)?))
    }

    fn empty(shape: Shape) -> Self {
        RunLengthVolume {
            shape,
            rows: BTreeMap::new(),
        }
    }

    /// Create an empty volume with the same shape as `other`
    pub fn new_like(other: &RunLengthVolume) -> Self {
        Self::empty(other.shape.clone())
    }

    /// Encode a binary array
    ///
    /// # Errors
    ///
    /// Returns `RegionError::UnsupportedDimension` unless the array is 2D
    /// or 3D.
    pub fn from_array(array: &Array<bool>) -> RegionResult<Self> {
        let mut volume = Self::new(array.dims())?;
        let width = volume.width();
        for (line, data) in array.data().chunks_exact(width).enumerate() {
            let row = RunRow::from_bools(data);
            if !row.is_empty() {
                let y = line % volume.height();
                let z = line / volume.height();
                volume.rows.insert((z, y), row);
            }
        }
        Ok(volume)
    }

    /// Decode into a dense binary array
    pub fn to_array(&self) -> Array<bool> {
        let mut array = Array::with_shape(self.shape.clone(), false);
        let width = self.width();
        let height = self.height();
        let data = array.data_mut();
        for (&(z, y), row) in &self.rows {
            let base = (z * height + y) * width;
            for run in row.runs() {
                data[base + run.left..=base + run.right].fill(true);
            }
        }
        array
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Get the per-axis extents
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Get the number of axes (2 or 3)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Extent along axis 0 (run direction)
    #[inline]
    pub fn width(&self) -> usize {
        self.shape.dims()[0]
    }

    /// Extent along axis 1
    #[inline]
    pub fn height(&self) -> usize {
        self.shape.dims()[1]
    }

    /// Extent along axis 2, 1 for images
    #[inline]
    pub fn depth(&self) -> usize {
        self.shape.dims().get(2).copied().unwrap_or(1)
    }

    /// Get the row of line `(y, z)`, `None` if it has no foreground
    pub fn row(&self, y: usize, z: usize) -> Option<&RunRow> {
        self.rows.get(&(z, y))
    }

    /// Iterate over the non-empty rows as `(y, z, row)` in raster order
    pub fn rows(&self) -> impl Iterator<Item = (usize, usize, &RunRow)> + '_ {
        self.rows.iter().map(|(&(z, y), row)| (y, z, row))
    }

    /// Mark `left..=right` of line `(y, z)` as foreground
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if the range is reversed or
    /// any coordinate lies outside the volume.
    pub fn set_range(&mut self, y: usize, z: usize, left: usize, right: usize) -> RegionResult<()> {
        if left > right || right >= self.width() || y >= self.height() || z >= self.depth() {
            return Err(RegionError::InvalidParameters(format!(
                "range [{left}, {right}] on line ({y}, {z}) outside {:?}",
                self.dims()
            )));
        }
        self.insert_run(y, z, Run { left, right });
        Ok(())
    }

    pub(crate) fn insert_run(&mut self, y: usize, z: usize, run: Run) {
        self.rows
            .entry((z, y))
            .or_default()
            .insert(run);
    }

    /// Whether line `(y, z)` covers all of `run`
    pub(crate) fn covers(&self, y: usize, z: usize, run: Run) -> bool {
        self.row(y, z)
            .is_some_and(|row| row.contains_range(run.left, run.right))
    }

    /// Get the value at a position
    ///
    /// # Errors
    ///
    /// Returns a core `PositionOutOfBounds` error if the position lies
    /// outside the volume.
    pub fn get(&self, pos: &[usize]) -> RegionResult<bool> {
        if self.shape.index_of(pos).is_none() {
            return Err(voxmorph_core::Error::PositionOutOfBounds {
                position: pos.to_vec(),
                dims: self.dims().to_vec(),
            }
            .into());
        }
        let z = pos.get(2).copied().unwrap_or(0);
        Ok(self.row(pos[1], z).is_some_and(|row| row.contains(pos[0])))
    }

    /// Number of foreground positions
    pub fn voxel_count(&self) -> usize {
        self.rows.values().map(RunRow::count).sum()
    }

    /// Number of stored runs
    pub fn run_count(&self) -> usize {
        self.rows.values().map(|row| row.runs().len()).sum()
    }

    /// Whether no position is foreground
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Invert every position
    pub fn complement(&self) -> RunLengthVolume {
        let width = self.width();
        let full = RunRow::new().complement(width);
        let mut rows = BTreeMap::new();
        for z in 0..self.depth() {
            for y in 0..self.height() {
                let row = match self.rows.get(&(z, y)) {
                    Some(row) => row.complement(width),
                    None => full.clone(),
                };
                if !row.is_empty() {
                    rows.insert((z, y), row);
                }
            }
        }
        RunLengthVolume {
            shape: self.shape.clone(),
            rows,
        }
    }

    /// Foreground positions lying on the outer border
    pub fn border_marker(&self) -> RunLengthVolume {
        let (width, height, depth) = (self.width(), self.height(), self.depth());
        let mut marker = Self::new_like(self);
        for (&(z, y), row) in &self.rows {
            let outer_y = y == 0 || y + 1 == height;
            let outer_z = self.ndim() == 3 && (z == 0 || z + 1 == depth);
            if outer_y || outer_z {
                marker.rows.insert((z, y), row.clone());
                continue;
            }
            for x in [0, width - 1] {
                if row.contains(x) {
                    marker.insert_run(y, z, Run { left: x, right: x });
                }
            }
        }
        marker
    }

    /// Positions foreground in both volumes
    ///
    /// # Errors
    ///
    /// Returns `RegionError::ShapeMismatch` if the shapes differ.
    pub fn intersection(&self, other: &RunLengthVolume) -> RegionResult<RunLengthVolume> {
        check_same_dims(self.dims(), other.dims())?;
        let mut result = Self::new_like(self);
        for (&key, row) in &self.rows {
            if let Some(theirs) = other.rows.get(&key) {
                let shared = row.intersection(theirs);
                if !shared.is_empty() {
                    result.rows.insert(key, shared);
                }
            }
        }
        Ok(result)
    }

    /// Positions foreground in `self` but not in `other`
    ///
    /// # Errors
    ///
    /// Returns `RegionError::ShapeMismatch` if the shapes differ.
    pub fn difference(&self, other: &RunLengthVolume) -> RegionResult<RunLengthVolume> {
        check_same_dims(self.dims(), other.dims())?;
        let mut result = Self::new_like(self);
        for (&key, row) in &self.rows {
            let rest = match other.rows.get(&key) {
                Some(theirs) => row.difference(theirs),
                None => row.clone(),
            };
            if !rest.is_empty() {
                result.rows.insert(key, rest);
            }
        }
        Ok(result)
    }

    /// Lines sharing a face with line `(y, z)`: `y ± 1` and, for volumes,
    /// `z ± 1`
    pub(crate) fn lateral_lines(&self, y: usize, z: usize) -> impl Iterator<Item = (usize, usize)> {
        let (height, depth) = (self.height(), self.depth());
        [
            (y.checked_sub(1), Some(z)),
            ((y + 1 < height).then_some(y + 1), Some(z)),
            (Some(y), z.checked_sub(1)),
            (Some(y), (z + 1 < depth).then_some(z + 1)),
        ]
        .into_iter()
        .filter_map(|(y, z)| Some((y?, z?)))
    }
}
