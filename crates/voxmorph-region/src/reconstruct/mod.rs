//! Morphological reconstruction by dilation or erosion
//!
//! Reconstruction grows a *marker* array inside a *mask* array: by dilation
//! the marker spreads the largest values of each connected region up to the
//! mask, by erosion it spreads the smallest values down to it. The result
//! `R` satisfies `M <= R <= K` (dilation; reversed for erosion) and is a
//! fixed point of the relaxation
//! `R(p) = clamp(combine(R(p), R(q) for neighbors q), K(p))`.
//!
//! The computation uses the hybrid algorithm: a forward raster scan, a
//! backward raster scan, then a FIFO queue for the remaining updates. 2D and
//! 3D arrays take specialized neighbor enumeration; other ranks use the
//! generic one. All produce the same result.
//!
//! # Examples
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//! use voxmorph_region::reconstruct_by_dilation;
//!
//! let mask = Array::from_rows(&[".#.", "###", ".#."]).unwrap();
//! let mut marker = Array::<bool>::new_like(&mask);
//! marker.set(&[1, 1], true).unwrap();
//!
//! let rec = reconstruct_by_dilation(&marker, &mask, &Connectivity::four()).unwrap();
//! assert_eq!(rec, mask);
//! ```

mod grid;
mod hybrid;
mod planar;
mod volume;

pub use hybrid::RelaxationStats;

use crate::error::{RegionResult, check_connectivity, check_same_dims};
use grid::GridNd;
use planar::Grid2d;
use volume::Grid3d;
use voxmorph_core::{Array, Connectivity, NoProgress, ProgressSink, Sample};

/// Direction of a reconstruction
///
/// Each direction supplies the two primitives of the relaxation rule:
/// [`combine`](Self::combine) merges a value with a neighbor's, and
/// [`clamp`](Self::clamp) bounds the merged value by the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconstructionType {
    /// Propagate maxima, bounded above by the mask
    #[default]
    ByDilation,
    /// Propagate minima, bounded below by the mask
    ByErosion,
}

impl ReconstructionType {
    /// Merge a value with a neighbor's value
    #[inline]
    pub fn combine<T: Sample>(self, a: T, b: T) -> T {
        match self {
            Self::ByDilation => T::max_of(a, b),
            Self::ByErosion => T::min_of(a, b),
        }
    }

    /// Bound a value by the mask value at the same position
    #[inline]
    pub fn clamp<T: Sample>(self, value: T, mask: T) -> T {
        match self {
            Self::ByDilation => T::min_of(value, mask),
            Self::ByErosion => T::max_of(value, mask),
        }
    }

    /// Whether `candidate` moves strictly further in this direction than
    /// `current`
    #[inline]
    pub fn improves<T: Sample>(self, candidate: T, current: T) -> bool {
        match self {
            Self::ByDilation => candidate > current,
            Self::ByErosion => candidate < current,
        }
    }

    /// Whether `value` lies on the allowed side of `bound`
    #[inline]
    pub fn is_within<T: Sample>(self, value: T, bound: T) -> bool {
        match self {
            Self::ByDilation => value <= bound,
            Self::ByErosion => value >= bound,
        }
    }
}

/// Options for reconstruction
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Reconstruction direction
    pub kind: ReconstructionType,
    /// Neighborhood used for propagation
    pub connectivity: Connectivity,
    /// Use the planar/volume neighbor grids for 2D/3D arrays
    pub specialize: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            kind: ReconstructionType::ByDilation,
            connectivity: Connectivity::four(),
            specialize: true,
        }
    }
}

impl ReconstructOptions {
    /// Create new options with the specified connectivity
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the reconstruction direction
    pub fn with_kind(mut self, kind: ReconstructionType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Enable or disable the 2D/3D specializations
    pub fn with_specialization(mut self, specialize: bool) -> Self {
        self.specialize = specialize;
        self
    }
}

/// Hybrid reconstruction engine bound to a progress sink
pub struct HybridReconstruction<'a> {
    options: ReconstructOptions,
    progress: &'a dyn ProgressSink,
}

impl HybridReconstruction<'static> {
    /// Create an engine that reports nothing
    pub fn new(options: ReconstructOptions) -> Self {
        Self {
            options,
            progress: &NoProgress,
        }
    }
}

impl<'a> HybridReconstruction<'a> {
    /// Report status and progress to `progress`
    pub fn with_progress<'b>(self, progress: &'b dyn ProgressSink) -> HybridReconstruction<'b> {
        HybridReconstruction {
            options: self.options,
            progress,
        }
    }

    /// Get the options
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct `marker` under `mask` into a new array
    ///
    /// # Errors
    ///
    /// Returns `RegionError::ShapeMismatch` if marker and mask differ in
    /// shape, `RegionError::ConnectivityMismatch` if the connectivity does
    /// not match their dimensionality.
    pub fn apply<T: Sample>(&self, marker: &Array<T>, mask: &Array<T>) -> RegionResult<Array<T>> {
        self.validate(marker, mask)?;
        let mut result = Array::new_like(marker);
        self.run(marker, mask, &mut result);
        Ok(result)
    }

    /// Reconstruct `marker` under `mask` into a caller-supplied buffer
    ///
    /// `result` is overwritten entirely. Nothing is written if validation
    /// fails.
    ///
    /// # Errors
    ///
    /// As [`apply`](Self::apply), plus `RegionError::ShapeMismatch` if
    /// `result` differs in shape.
    pub fn apply_into<T: Sample>(
        &self,
        marker: &Array<T>,
        mask: &Array<T>,
        result: &mut Array<T>,
    ) -> RegionResult<RelaxationStats> {
        self.validate(marker, mask)?;
        check_same_dims(marker.dims(), result.dims())?;
        Ok(self.run(marker, mask, result))
    }

    /// Reconstruct in place: `marker` is replaced by the reconstruction
    ///
    /// # Errors
    ///
    /// As [`apply`](Self::apply). The marker is untouched on error.
    pub fn apply_in_place<T: Sample>(
        &self,
        marker: &mut Array<T>,
        mask: &Array<T>,
    ) -> RegionResult<RelaxationStats> {
        self.validate(marker, mask)?;
        let kind = self.options.kind;
        for (r, &m) in marker.data_mut().iter_mut().zip(mask.data()) {
            *r = kind.clamp(*r, m);
        }
        Ok(self.relax(mask, marker))
    }

    fn validate<T: Sample>(&self, marker: &Array<T>, mask: &Array<T>) -> RegionResult<()> {
        check_same_dims(marker.dims(), mask.dims())?;
        check_connectivity(&self.options.connectivity, marker.ndim())
    }

    fn run<T: Sample>(
        &self,
        marker: &Array<T>,
        mask: &Array<T>,
        result: &mut Array<T>,
    ) -> RelaxationStats {
        self.progress.on_status("initialize");
        let kind = self.options.kind;
        for ((r, &s), &m) in result
            .data_mut()
            .iter_mut()
            .zip(marker.data())
            .zip(mask.data())
        {
            *r = kind.clamp(s, m);
        }
        self.relax(mask, result)
    }

    fn relax<T: Sample>(&self, mask: &Array<T>, result: &mut Array<T>) -> RelaxationStats {
        let kind = self.options.kind;
        let conn = &self.options.connectivity;
        let shape = mask.shape();
        let stats = match (self.options.specialize, shape.ndim()) {
            (true, 2) => hybrid::relax(
                &mut Grid2d::new(shape, conn),
                kind,
                mask,
                result,
                self.progress,
            ),
            (true, 3) => hybrid::relax(
                &mut Grid3d::new(shape, conn),
                kind,
                mask,
                result,
                self.progress,
            ),
            _ => hybrid::relax(
                &mut GridNd::new(shape, conn),
                kind,
                mask,
                result,
                self.progress,
            ),
        };
        tracing::debug!(
            target: "voxmorph",
            kind = ?kind,
            dims = ?shape.dims(),
            forward = stats.forward_updates,
            backward = stats.backward_updates,
            queued = stats.queue_pops,
            "reconstruction finished"
        );
        stats
    }
}

/// Reconstruct `marker` under `mask`
///
/// # Errors
///
/// See [`HybridReconstruction::apply`].
pub fn reconstruct<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    options: &ReconstructOptions,
) -> RegionResult<Array<T>> {
    HybridReconstruction::new(options.clone()).apply(marker, mask)
}

/// Reconstruct `marker` under `mask` into a caller-supplied buffer
///
/// # Errors
///
/// See [`HybridReconstruction::apply_into`].
pub fn reconstruct_into<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    result: &mut Array<T>,
    options: &ReconstructOptions,
) -> RegionResult<()> {
    HybridReconstruction::new(options.clone())
        .apply_into(marker, mask, result)
        .map(|_| ())
}

/// Reconstruction by dilation of `marker` under `mask`
///
/// # Errors
///
/// See [`HybridReconstruction::apply`].
pub fn reconstruct_by_dilation<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    connectivity: &Connectivity,
) -> RegionResult<Array<T>> {
    let options = ReconstructOptions::new(connectivity.clone());
    reconstruct(marker, mask, &options)
}

/// Reconstruction by erosion of `marker` over `mask`
///
/// # Errors
///
/// See [`HybridReconstruction::apply`].
pub fn reconstruct_by_erosion<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    connectivity: &Connectivity,
) -> RegionResult<Array<T>> {
    let options =
        ReconstructOptions::new(connectivity.clone()).with_kind(ReconstructionType::ByErosion);
    reconstruct(marker, mask, &options)
}
