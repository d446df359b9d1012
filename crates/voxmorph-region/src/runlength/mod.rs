//! Run-length encoded binary images and volumes
//!
//! Foreground is stored as closed intervals ([`Run`]) along axis 0, one
//! sorted [`RunRow`] per line. Sparse data then costs memory proportional
//! to its boundary rather than its extent, and binary reconstruction can
//! propagate whole runs at a time.
//!
//! # Examples
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//! use voxmorph_region::{RunLengthVolume, reconstruct_by_dilation_rle};
//!
//! let mask = Array::from_rows(&["##..#", ".#..#", ".###."]).unwrap();
//! let mask = RunLengthVolume::from_array(&mask).unwrap();
//! let mut marker = RunLengthVolume::new_like(&mask);
//! marker.set_range(0, 0, 0, 0).unwrap();
//!
//! let rec = reconstruct_by_dilation_rle(&marker, &mask, &Connectivity::four()).unwrap();
//! assert_eq!(rec.voxel_count(), 6);
//! ```

mod reconstruct;
mod row;
mod run;
mod volume;

pub use reconstruct::{
    fill_holes_rle, kill_borders_rle, reconstruct_by_dilation_rle,
    reconstruct_by_dilation_rle_with_progress,
};
pub use row::RunRow;
pub use run::Run;
pub use volume::RunLengthVolume;
