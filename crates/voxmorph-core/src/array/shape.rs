//! Array shapes, stride tables and raster-order cursors
//!
//! Raster order is lexicographic with dimension 0 varying fastest, so the
//! linear index of a position is `sum(pos[d] * strides[d])` with
//! `strides[0] == 1`. Walking linear indices `0..len` therefore visits
//! positions in raster order.

use crate::error::{Error, Result};

/// Extent of an N-dimensional array together with its stride table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl Shape {
    /// Create a shape from per-axis extents
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `dims` is empty, any extent is
    /// zero, or the element count overflows `usize`.
    pub fn new(dims: &[usize]) -> Result<Self> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(Error::InvalidDimension(dims.to_vec()));
        }

        let mut strides = Vec::with_capacity(dims.len());
        let mut len = 1usize;
        for &d in dims {
            strides.push(len);
            len = len
                .checked_mul(d)
                .ok_or_else(|| Error::InvalidDimension(dims.to_vec()))?;
        }

        Ok(Shape {
            dims: dims.to_vec(),
            strides,
            len,
        })
    }

    /// Number of axes
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Per-axis extents
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Per-axis linear strides (`strides[0] == 1`)
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: shapes with a zero extent cannot be constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether a signed position lies inside the array
    pub fn contains(&self, pos: &[isize]) -> bool {
        pos.len() == self.dims.len()
            && pos
                .iter()
                .zip(&self.dims)
                .all(|(&p, &d)| p >= 0 && (p as usize) < d)
    }

    /// Linear index of a position, or `None` if it lies outside the array
    pub fn index_of(&self, pos: &[usize]) -> Option<usize> {
        if pos.len() != self.dims.len() {
            return None;
        }
        let mut index = 0;
        for ((&p, &d), &s) in pos.iter().zip(&self.dims).zip(&self.strides) {
            if p >= d {
                return None;
            }
            index += p * s;
        }
        Some(index)
    }

    /// Position of a linear index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn position_of(&self, index: usize) -> Vec<usize> {
        let mut coords = vec![0; self.dims.len()];
        self.unravel_into(index, &mut coords);
        coords
    }

    /// Decompose a linear index into `coords` without allocating
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or `coords.len() != ndim()`.
    pub fn unravel_into(&self, index: usize, coords: &mut [usize]) {
        assert!(index < self.len, "index {index} out of bounds");
        assert_eq!(coords.len(), self.dims.len());
        let mut rest = index;
        for (c, &d) in coords.iter_mut().zip(&self.dims) {
            *c = rest % d;
            rest /= d;
        }
    }

    /// Linear index of `pos + offset`, or `None` if that falls outside
    pub fn offset_index(&self, pos: &[usize], offset: &[isize]) -> Option<usize> {
        if pos.len() != self.dims.len() || offset.len() != self.dims.len() {
            return None;
        }
        let mut index = 0;
        for (((&p, &o), &d), &s) in pos.iter().zip(offset).zip(&self.dims).zip(&self.strides) {
            let q = p as isize + o;
            if q < 0 || q as usize >= d {
                return None;
            }
            index += q as usize * s;
        }
        Some(index)
    }

    /// Signed linear delta corresponding to an offset vector
    pub fn offset_delta(&self, offset: &[isize]) -> isize {
        offset
            .iter()
            .zip(&self.strides)
            .map(|(&o, &s)| o * s as isize)
            .sum()
    }

    /// Iterate over all positions in raster order
    pub fn positions(&self) -> Positions<'_> {
        Positions {
            shape: self,
            cursor: Some(Cursor::first(self)),
        }
    }

    /// Check that another shape has exactly the same extents
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` otherwise.
    pub fn check_same(&self, other: &Shape) -> Result<()> {
        if self.dims != other.dims {
            return Err(Error::DimensionMismatch {
                expected: self.dims.clone(),
                actual: other.dims.clone(),
            });
        }
        Ok(())
    }
}

/// A position in an array: linear index plus its coordinate vector
///
/// A cursor is a plain value. It does not borrow the array or shape it walks;
/// the shape is passed to each move so that the same cursor type serves any
/// array of that shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    coords: Vec<usize>,
}

impl Cursor {
    /// Cursor at the first position in raster order
    pub fn first(shape: &Shape) -> Self {
        Cursor {
            index: 0,
            coords: vec![0; shape.ndim()],
        }
    }

    /// Cursor at the last position in raster order
    pub fn last(shape: &Shape) -> Self {
        Cursor {
            index: shape.len() - 1,
            coords: shape.dims().iter().map(|&d| d - 1).collect(),
        }
    }

    /// Cursor at an arbitrary linear index
    ///
    /// # Panics
    ///
    /// Panics if `index >= shape.len()`.
    pub fn at(shape: &Shape, index: usize) -> Self {
        Cursor {
            index,
            coords: shape.position_of(index),
        }
    }

    /// Linear index
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Coordinates
    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }

    /// Move to the next position in raster order
    ///
    /// Returns `false` (leaving the cursor unchanged) at the last position.
    pub fn advance(&mut self, shape: &Shape) -> bool {
        if self.index + 1 >= shape.len() {
            return false;
        }
        self.index += 1;
        for (c, &d) in self.coords.iter_mut().zip(shape.dims()) {
            *c += 1;
            if *c < d {
                break;
            }
            *c = 0;
        }
        true
    }

    /// Move to the previous position in raster order
    ///
    /// Returns `false` (leaving the cursor unchanged) at the first position.
    pub fn retreat(&mut self, shape: &Shape) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        for (c, &d) in self.coords.iter_mut().zip(shape.dims()) {
            if *c > 0 {
                *c -= 1;
                break;
            }
            *c = d - 1;
        }
        true
    }
}

/// Raster-order iterator over the positions of a shape
pub struct Positions<'a> {
    shape: &'a Shape,
    cursor: Option<Cursor>,
}

impl Iterator for Positions<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let item = cursor.coords.clone();
        if !cursor.advance(self.shape) {
            self.cursor = None;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .cursor
            .as_ref()
            .map_or(0, |c| self.shape.len() - c.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_rejects_zero_extent() {
        assert!(Shape::new(&[]).is_err());
        assert!(Shape::new(&[3, 0, 2]).is_err());
    }

    #[test]
    fn test_strides_dim0_fastest() {
        let shape = Shape::new(&[4, 3, 2]).unwrap();
        assert_eq!(shape.strides(), &[1, 4, 12]);
        assert_eq!(shape.len(), 24);
        assert_eq!(shape.index_of(&[1, 2, 1]), Some(1 + 8 + 12));
        assert_eq!(shape.position_of(21), vec![1, 2, 1]);
        assert_eq!(shape.index_of(&[4, 0, 0]), None);
    }

    #[test]
    fn test_offset_index_bounds() {
        let shape = Shape::new(&[5, 4]).unwrap();
        assert_eq!(shape.offset_index(&[0, 0], &[-1, 0]), None);
        assert_eq!(shape.offset_index(&[4, 3], &[0, 1]), None);
        assert_eq!(shape.offset_index(&[2, 1], &[1, 1]), Some(3 + 10));
        assert_eq!(shape.offset_delta(&[1, -1]), -4);
    }

    #[test]
    fn test_positions_raster_order() {
        let shape = Shape::new(&[2, 3]).unwrap();
        let all: Vec<Vec<usize>> = shape.positions().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], vec![0, 0]);
        assert_eq!(all[1], vec![1, 0]);
        assert_eq!(all[2], vec![0, 1]);
        assert_eq!(all[5], vec![1, 2]);
        for (i, pos) in all.iter().enumerate() {
            assert_eq!(shape.index_of(pos), Some(i));
        }
    }

    #[test]
    fn test_cursor_retreat_mirrors_advance() {
        let shape = Shape::new(&[3, 2, 2]).unwrap();
        let mut cursor = Cursor::last(&shape);
        let mut seen = vec![cursor.index()];
        while cursor.retreat(&shape) {
            assert_eq!(shape.index_of(cursor.coords()), Some(cursor.index()));
            seen.push(cursor.index());
        }
        assert_eq!(seen, (0..12).rev().collect::<Vec<_>>());
        assert!(!cursor.retreat(&shape));
    }
}
