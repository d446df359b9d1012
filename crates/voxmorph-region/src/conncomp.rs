//! Connected component labeling
//!
//! This module assigns dense labels `1..=L` to the connected foreground
//! components of a binary array. Labels follow discovery order in a single
//! raster pass; each new component is flood-filled run by run before the
//! scan continues. Background stays 0.
//!
//! The label type bounds how many components can be represented. Running out
//! of labels is an error; no partial label map is returned.

use crate::error::{RegionError, RegionResult, check_connectivity};
use crate::scanline::ScanlineFill;
use voxmorph_core::{Array, Connectivity, NoProgress, ProgressSink, Sample};

/// Integer types usable as component labels
pub trait LabelValue: Sample + Into<u64> {
    /// Largest label the type can hold
    const MAX_LABEL: u32;

    /// Convert a label known to be at most `MAX_LABEL`
    fn from_label(label: u32) -> Self;
}

impl LabelValue for u8 {
    const MAX_LABEL: u32 = u8::MAX as u32;

    #[inline]
    fn from_label(label: u32) -> Self {
        label as u8
    }
}

impl LabelValue for u16 {
    const MAX_LABEL: u32 = u16::MAX as u32;

    #[inline]
    fn from_label(label: u32) -> Self {
        label as u16
    }
}

impl LabelValue for u32 {
    const MAX_LABEL: u32 = u32::MAX;

    #[inline]
    fn from_label(label: u32) -> Self {
        label
    }
}

/// Output integer width of a label map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelWidth {
    /// Up to 255 components
    Bits8,
    /// Up to 65535 components
    Bits16,
    /// Up to `u32::MAX` components
    #[default]
    Bits32,
}

impl LabelWidth {
    /// Largest label representable at this width
    pub fn max_label(self) -> u32 {
        match self {
            LabelWidth::Bits8 => u8::MAX_LABEL,
            LabelWidth::Bits16 => u16::MAX_LABEL,
            LabelWidth::Bits32 => u32::MAX_LABEL,
        }
    }
}

/// Label map of a width chosen at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum LabelMap {
    /// 8-bit labels
    U8(Array<u8>),
    /// 16-bit labels
    U16(Array<u16>),
    /// 32-bit labels
    U32(Array<u32>),
}

impl LabelMap {
    /// Width of the stored labels
    pub fn width(&self) -> LabelWidth {
        match self {
            LabelMap::U8(_) => LabelWidth::Bits8,
            LabelMap::U16(_) => LabelWidth::Bits16,
            LabelMap::U32(_) => LabelWidth::Bits32,
        }
    }

    /// Get the per-axis extents
    pub fn dims(&self) -> &[usize] {
        match self {
            LabelMap::U8(a) => a.dims(),
            LabelMap::U16(a) => a.dims(),
            LabelMap::U32(a) => a.dims(),
        }
    }

    /// Label at a linear index
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn label_at(&self, index: usize) -> u32 {
        match self {
            LabelMap::U8(a) => u32::from(a.at(index)),
            LabelMap::U16(a) => u32::from(a.at(index)),
            LabelMap::U32(a) => a.at(index),
        }
    }

    /// Largest label present, which is the number of components
    pub fn max_label(&self) -> u32 {
        match self {
            LabelMap::U8(a) => a.data().iter().copied().max().map_or(0, u32::from),
            LabelMap::U16(a) => a.data().iter().copied().max().map_or(0, u32::from),
            LabelMap::U32(a) => a.data().iter().copied().max().unwrap_or(0),
        }
    }

    /// Widen to 32-bit labels
    pub fn to_u32(&self) -> Array<u32> {
        match self {
            LabelMap::U8(a) => a.map(u32::from),
            LabelMap::U16(a) => a.map(u32::from),
            LabelMap::U32(a) => a.clone(),
        }
    }
}

/// Options for component labeling
#[derive(Debug, Clone)]
pub struct LabelOptions {
    /// Connectivity defining adjacency of foreground elements
    pub connectivity: Connectivity,
    /// Integer width of the label map
    pub width: LabelWidth,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::four(),
            width: LabelWidth::Bits32,
        }
    }
}

impl LabelOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the label width
    pub fn with_width(mut self, width: LabelWidth) -> Self {
        self.width = width;
        self
    }
}

/// Label the connected components of a binary array
///
/// # Arguments
///
/// * `image` - Binary array of any rank
/// * `connectivity` - Adjacency of foreground elements
///
/// # Returns
///
/// A label map of the same shape: 0 for background, `1..=L` for the
/// components in the order their first element appears in raster order.
///
/// # Errors
///
/// Returns `RegionError::ConnectivityMismatch` if the connectivity does not
/// match the array's dimensionality, and `RegionError::LabelOverflow` if
/// there are more components than `L` can represent.
///
/// # Examples
///
/// ```
/// use voxmorph_core::{Array, Connectivity};
/// use voxmorph_region::label_components;
///
/// let img = Array::from_rows(&["##..", "...#"]).unwrap();
/// let labels = label_components::<u8>(&img, &Connectivity::four()).unwrap();
/// assert_eq!(labels.data(), &[1, 1, 0, 0, 0, 0, 0, 2]);
/// ```
pub fn label_components<L: LabelValue>(
    image: &Array<bool>,
    connectivity: &Connectivity,
) -> RegionResult<Array<L>> {
    label_components_with_progress(image, connectivity, &NoProgress)
}

/// [`label_components`] reporting to a progress sink
///
/// # Errors
///
/// See [`label_components`].
pub fn label_components_with_progress<L: LabelValue>(
    image: &Array<bool>,
    connectivity: &Connectivity,
    progress: &dyn ProgressSink,
) -> RegionResult<Array<L>> {
    check_connectivity(connectivity, image.ndim())?;
    progress.on_status("label scan");

    let mut labels = Array::<L>::new_like(image);
    let count = if image.ndim() == 1 && *connectivity == Connectivity::line() {
        label_runs(image, &mut labels)?
    } else {
        label_regions(image, connectivity, &mut labels, progress)?
    };

    tracing::debug!(
        target: "voxmorph",
        components = count,
        dims = ?image.dims(),
        "labeling finished"
    );
    Ok(labels)
}

/// Label components with the width chosen in `options`
///
/// # Errors
///
/// See [`label_components`].
pub fn label_with_options(image: &Array<bool>, options: &LabelOptions) -> RegionResult<LabelMap> {
    let conn = &options.connectivity;
    Ok(match options.width {
        LabelWidth::Bits8 => LabelMap::U8(label_components(image, conn)?),
        LabelWidth::Bits16 => LabelMap::U16(label_components(image, conn)?),
        LabelWidth::Bits32 => LabelMap::U32(label_components(image, conn)?),
    })
}

fn next_label<L: LabelValue>(count: &mut u32) -> RegionResult<L> {
    if *count >= L::MAX_LABEL {
        return Err(RegionError::LabelOverflow {
            max_label: L::MAX_LABEL,
        });
    }
    *count += 1;
    Ok(L::from_label(*count))
}

/// Each maximal run of a 1D array is one component
fn label_runs<L: LabelValue>(image: &Array<bool>, labels: &mut Array<L>) -> RegionResult<u32> {
    let mut count = 0;
    let mut current = L::default();
    for (i, &fg) in image.data().iter().enumerate() {
        if !fg {
            current = L::default();
            continue;
        }
        if current == L::default() {
            current = next_label(&mut count)?;
        }
        labels.set_at(i, current);
    }
    Ok(count)
}

fn label_regions<L: LabelValue>(
    image: &Array<bool>,
    connectivity: &Connectivity,
    labels: &mut Array<L>,
    progress: &dyn ProgressSink,
) -> RegionResult<u32> {
    let filler = ScanlineFill::new(image.shape(), connectivity);
    let planes = image.dims().last().copied().unwrap_or(1);
    let plane_len = image.len() / planes;

    let mut count = 0;
    for i in 0..image.len() {
        if i % plane_len == 0 {
            progress.on_progress(i / plane_len, planes);
        }
        if !image.at(i) || labels.at(i) != L::default() {
            continue;
        }
        let label = next_label::<L>(&mut count)?;
        filler.fill(i, |j| {
            if image.at(j) && labels.at(j) == L::default() {
                labels.set_at(j, label);
                true
            } else {
                false
            }
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_shape() {
        let img = Array::from_rows(&[".....", "..#..", ".###.", "..#.."]).unwrap();
        let labels = label_components::<u32>(&img, &Connectivity::four()).unwrap();
        assert_eq!(labels.count(|l| l == 1), 5);
        assert_eq!(labels.data().iter().max(), Some(&1));
    }

    #[test]
    fn test_discovery_order() {
        let img = Array::from_rows(&["...#", "#...", "#.##"]).unwrap();
        let labels = label_components::<u16>(&img, &Connectivity::four()).unwrap();
        assert_eq!(labels.get(&[3, 0]).unwrap(), 1);
        assert_eq!(labels.get(&[0, 1]).unwrap(), 2);
        assert_eq!(labels.get(&[0, 2]).unwrap(), 2);
        assert_eq!(labels.get(&[2, 2]).unwrap(), 3);
    }

    #[test]
    fn test_eight_merges_diagonals() {
        let img = Array::from_rows(&["#.#", ".#.", "#.#"]).unwrap();
        let four = label_components::<u8>(&img, &Connectivity::four()).unwrap();
        let eight = label_components::<u8>(&img, &Connectivity::eight()).unwrap();
        assert_eq!(four.data().iter().max(), Some(&5));
        assert_eq!(eight.data().iter().max(), Some(&1));
    }

    #[test]
    fn test_one_dimensional_runs() {
        let img = Array::from_vec(&[8], vec![true, true, false, true, false, false, true, true])
            .unwrap();
        let labels = label_components::<u8>(&img, &Connectivity::line()).unwrap();
        assert_eq!(labels.data(), &[1, 1, 0, 2, 0, 0, 3, 3]);
    }

    #[test]
    fn test_three_dimensional() {
        let mut img = Array::<bool>::new(&[3, 3, 3]).unwrap();
        img.set(&[0, 0, 0], true).unwrap();
        img.set(&[1, 1, 1], true).unwrap();
        img.set(&[1, 1, 2], true).unwrap();
        let six = label_components::<u32>(&img, &Connectivity::six()).unwrap();
        assert_eq!(six.data().iter().max(), Some(&2));
        let full = label_components::<u32>(&img, &Connectivity::twenty_six()).unwrap();
        assert_eq!(full.data().iter().max(), Some(&1));
    }

    #[test]
    fn test_overflow_u8() {
        // 256 isolated elements on a checkerboard of gaps
        let img = Array::<bool>::from_fn(&[32, 16], |p| p[0] % 2 == 0 && p[1] % 2 == 0).unwrap();
        assert_eq!(img.count(|v| v), 128);
        assert!(label_components::<u8>(&img, &Connectivity::four()).is_ok());

        let img = Array::<bool>::from_fn(&[64, 16], |p| p[0] % 2 == 0 && p[1] % 2 == 0).unwrap();
        assert_eq!(img.count(|v| v), 256);
        assert!(matches!(
            label_components::<u8>(&img, &Connectivity::four()),
            Err(RegionError::LabelOverflow { max_label: 255 })
        ));
        assert!(label_components::<u16>(&img, &Connectivity::four()).is_ok());
    }

    #[test]
    fn test_label_with_options() {
        let img = Array::from_rows(&["#.#", "...", "#.#"]).unwrap();
        let options = LabelOptions::default().with_width(LabelWidth::Bits8);
        let map = label_with_options(&img, &options).unwrap();
        assert_eq!(map.width(), LabelWidth::Bits8);
        assert_eq!(map.max_label(), 4);
        assert_eq!(map.label_at(2), 2);
        assert_eq!(map.to_u32().dims(), &[3, 3]);
    }

    #[test]
    fn test_connectivity_mismatch() {
        let img = Array::<bool>::new(&[4, 4]).unwrap();
        assert!(matches!(
            label_components::<u32>(&img, &Connectivity::six()),
            Err(RegionError::ConnectivityMismatch { .. })
        ));
    }
}
