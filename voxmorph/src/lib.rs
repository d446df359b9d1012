//! voxmorph - Morphological reconstruction and labeling for Rust
//!
//! # Overview
//!
//! voxmorph works on dense N-dimensional arrays and provides:
//!
//! - Morphological reconstruction by dilation and erosion (hybrid algorithm)
//! - Hole filling, border clearing and flood fill
//! - Run-length encoded binary images and volumes with run-based
//!   reconstruction
//! - Connected-component labeling with 8, 16 or 32-bit label maps
//!
//! # Example
//!
//! ```
//! use voxmorph::{Array, Connectivity};
//! use voxmorph::region::fill_holes;
//!
//! // A hollow 5x5x5 cube
//! let cube = Array::<bool>::from_fn(&[5, 5, 5], |p| p.iter().any(|&c| c == 0 || c == 4)).unwrap();
//! let filled = fill_holes(&cube, &Connectivity::six()).unwrap();
//! assert_eq!(filled.count(|v| v), 125);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use voxmorph_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use voxmorph_region as region;
