//! voxmorph Core - Basic data structures for array processing
//!
//! This crate provides the fundamental data structures used throughout
//! the voxmorph workspace:
//!
//! - [`Array`] - Dense N-dimensional array of [`Sample`] values
//! - [`Shape`] / [`Cursor`] - Extents, stride table and raster-order positions
//! - [`Connectivity`] - Neighbor offsets with forward/backward halves
//! - [`ProgressSink`] - Advisory status and progress reporting
//!
//! # Examples
//!
//! ```
//! use voxmorph_core::{Array, Connectivity};
//!
//! let img = Array::<bool>::new(&[8, 8]).unwrap();
//! let conn = Connectivity::eight();
//! assert_eq!(img.ndim(), conn.ndim());
//! ```

pub mod array;
pub mod connectivity;
pub mod error;
pub mod progress;

pub use array::{Array, Cursor, Positions, Sample, Shape};
pub use connectivity::{Adjacency, Connectivity};
pub use error::{Error, Result};
pub use progress::{NoProgress, ProgressSink, TracingProgress};
