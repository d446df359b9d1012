//! Array - Dense N-dimensional array
//!
//! `Array<T>` stores one [`Sample`] per position in raster order (dimension 0
//! varying fastest). It is the minimal array capability the region
//! algorithms consume: shape query, indexed read/write, same-shape
//! instantiation and raster-order position enumeration.
//!
//! Binary images and volumes are `Array<bool>`.
//!
//! # Examples
//!
//! ```
//! use voxmorph_core::Array;
//!
//! // Create a 4x3x2 volume of bytes
//! let mut vol = Array::<u8>::new(&[4, 3, 2]).unwrap();
//!
//! vol.set(&[1, 2, 1], 200).unwrap();
//! assert_eq!(vol.get(&[1, 2, 1]).unwrap(), 200);
//! assert_eq!(vol.len(), 24);
//! ```

mod sample;
mod shape;

pub use sample::Sample;
pub use shape::{Cursor, Positions, Shape};

use crate::error::{Error, Result};

/// Dense N-dimensional array
///
/// # Memory Layout
///
/// Data is stored in raster order with no padding. The element at position
/// `p` is at index `sum(p[d] * strides[d])`, see [`Shape::index_of`].
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Sample> Array<T> {
    /// Create a new array with every element set to the default value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `dims` is empty or contains a zero.
    pub fn new(dims: &[usize]) -> Result<Self> {
        Self::filled(dims, T::default())
    }

    /// Create a new array with every element set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if `dims` is empty or contains a zero.
    pub fn filled(dims: &[usize], value: T) -> Result<Self> {
        Ok(Self::with_shape(Shape::new(dims)?, value))
    }

    /// Create an array from raw data in raster order
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the data length
    /// does not match them.
    pub fn from_vec(dims: &[usize], data: Vec<T>) -> Result<Self> {
        let shape = Shape::new(dims)?;
        if data.len() != shape.len() {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {:?} = {}",
                data.len(),
                dims,
                shape.len()
            )));
        }
        Ok(Array { shape, data })
    }

    /// Create an array from a shape and a generator called for each
    /// position in raster order
    pub fn from_fn<F>(dims: &[usize], mut f: F) -> Result<Self>
    where
        F: FnMut(&[usize]) -> T,
    {
        let shape = Shape::new(dims)?;
        let data = shape.positions().map(|pos| f(&pos)).collect();
        Ok(Array { shape, data })
    }

    /// Create a default-filled array with the same shape as `other`
    pub fn new_like<U>(other: &Array<U>) -> Self {
        Self::with_shape(other.shape.clone(), T::default())
    }

    /// Create an array of an already validated shape filled with `value`
    pub fn with_shape(shape: Shape, value: T) -> Self {
        let data = vec![value; shape.len()];
        Array { shape, data }
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

    /// Get the number of axes
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: arrays with a zero extent cannot be constructed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at a position
    ///
    /// # Errors
    ///
    /// Returns `Error::PositionOutOfBounds` if the position lies outside the
    /// array or has the wrong number of coordinates.
    #[inline]
    pub fn get(&self, pos: &[usize]) -> Result<T> {
        let index = self.checked_index(pos)?;
        Ok(self.data[index])
    }

    /// Set the value at a position
    ///
    /// # Errors
    ///
    /// Returns `Error::PositionOutOfBounds` if the position lies outside the
    /// array or has the wrong number of coordinates.
    #[inline]
    pub fn set(&mut self, pos: &[usize], value: T) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.data[index] = value;
        Ok(())
    }

    /// Get the value at a position without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the array.
    #[inline]
    pub fn get_unchecked(&self, pos: &[usize]) -> T {
        let index: usize = pos.iter().zip(self.shape.strides()).map(|(p, s)| p * s).sum();
        self.data[index]
    }

    /// Set the value at a position without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the array.
    #[inline]
    pub fn set_unchecked(&mut self, pos: &[usize], value: T) {
        let index: usize = pos.iter().zip(self.shape.strides()).map(|(p, s)| p * s).sum();
        self.data[index] = value;
    }

    /// Get the value at a linear (raster) index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> T {
        self.data[index]
    }

    /// Set the value at a linear (raster) index
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn set_at(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Get raw access to the data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array and return its data in raster order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over all positions in raster order
    pub fn positions(&self) -> Positions<'_> {
        self.shape.positions()
    }

    /// Set every element to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Apply a function to every element, producing a new array
    pub fn map<U: Sample, F: FnMut(T) -> U>(&self, f: F) -> Array<U> {
        Array {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Count the elements satisfying a predicate
    pub fn count<F: FnMut(T) -> bool>(&self, mut pred: F) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }

    /// Whether the position lies on the outer border of the array
    pub fn is_border(&self, pos: &[usize]) -> bool {
        pos.iter()
            .zip(self.shape.dims())
            .any(|(&p, &d)| p == 0 || p + 1 == d)
    }

    fn checked_index(&self, pos: &[usize]) -> Result<usize> {
        self.shape
            .index_of(pos)
            .ok_or_else(|| Error::PositionOutOfBounds {
                position: pos.to_vec(),
                dims: self.shape.dims().to_vec(),
            })
    }
}

impl Array<bool> {
    /// Build a binary array from rows of `0`/`1` (or `.`/`#`) characters
    ///
    /// Each string is one row along axis 0; rows stack along axis 1. Any
    /// character other than `0`, `.`, or a space counts as foreground.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows are empty or of unequal length.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxmorph_core::Array;
    ///
    /// let img = Array::from_rows(&["#.#", "###"]).unwrap();
    /// assert_eq!(img.dims(), &[3, 2]);
    /// assert!(!img.get(&[1, 0]).unwrap());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(Error::InvalidParameter(
                "all rows must have the same length".to_string(),
            ));
        }
        let data = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| !matches!(c, '0' | '.' | ' ')))
            .collect();
        Array::from_vec(&[width, rows.len()], data)
    }
}
