//! voxmorph-region - Reconstruction and region processing for voxmorph
//!
//! This crate provides region processing on N-dimensional arrays, including:
//!
//! - **Morphological reconstruction** - Hybrid scan/queue reconstruction by
//!   dilation or erosion, with planar and volume specializations
//! - **Seed fill operations** - Flood fill, hole filling and border clearing
//! - **Run-length volumes** - Sparse binary images and volumes with run-based
//!   reconstruction
//! - **Connected component analysis** - Labeling and per-component
//!   measurements
//!
//! # Examples
//!
//! ## Reconstruction
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//! use voxmorph_region::{ReconstructOptions, ReconstructionType, reconstruct};
//!
//! let mask = Array::from_vec(&[5], vec![4u8, 9, 9, 2, 9]).unwrap();
//! let marker = Array::from_vec(&[5], vec![0u8, 0, 7, 0, 0]).unwrap();
//!
//! let options = ReconstructOptions::new(Connectivity::line())
//!     .with_kind(ReconstructionType::ByDilation);
//! let rec = reconstruct(&marker, &mask, &options).unwrap();
//! assert_eq!(rec.data(), &[4, 7, 7, 2, 2]);
//! ```
//!
//! ## Labeling connected components
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//! use voxmorph_region::{count_components, label_components};
//!
//! let img = Array::from_rows(&["##..", "##..", "...#"]).unwrap();
//!
//! let labels = label_components::<u16>(&img, &Connectivity::four()).unwrap();
//! assert_eq!(labels.get(&[3, 2]).unwrap(), 2);
//! assert_eq!(count_components(&img, &Connectivity::eight()).unwrap(), 2);
//! ```
//!
//! ## Flood fill
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//! use voxmorph_region::flood_fill;
//!
//! let mut vol = Array::<u8>::new(&[10, 10, 10]).unwrap();
//!
//! // Fill from seed point
//! let count = flood_fill(&mut vol, &[5, 5, 5], 1, &Connectivity::six()).unwrap();
//! assert_eq!(count, 1000);
//! ```

pub mod conncomp;
pub mod error;
pub mod label;
pub mod reconstruct;
pub mod runlength;
mod scanline;
pub mod seedfill;

// Re-export core types
pub use voxmorph_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export reconstruction types and functions
pub use reconstruct::{
    HybridReconstruction, ReconstructOptions, ReconstructionType, RelaxationStats, reconstruct,
    reconstruct_by_dilation, reconstruct_by_erosion, reconstruct_into,
};

// Re-export run-length types and functions
pub use runlength::{
    Run, RunLengthVolume, RunRow, fill_holes_rle, kill_borders_rle, reconstruct_by_dilation_rle,
    reconstruct_by_dilation_rle_with_progress,
};

// Re-export seedfill functions
pub use seedfill::{fill_holes, flood_fill, kill_borders, remove_seeded_components};

// Re-export conncomp types and functions
pub use conncomp::{
    LabelMap, LabelOptions, LabelValue, LabelWidth, label_components,
    label_components_with_progress, label_with_options,
};

// Re-export label types and functions
pub use label::{
    ComponentBounds, ComponentStats, component_bounds, component_sizes, component_stats,
    count_components,
};
