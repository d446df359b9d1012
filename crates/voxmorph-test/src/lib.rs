//! voxmorph-test - Regression test framework for voxmorph
//!
//! This crate provides the shared tooling of the regression tests:
//!
//! - [`RegParams`] - indexed comparisons with a summary at cleanup, in
//!   **compare** mode (failures are recorded) or **display** mode (results
//!   are printed only)
//! - [`fixtures`] - reproducible random arrays seeded from `rand`
//! - [`reference`] - straightforward breadth-first reference algorithms used
//!   as oracles
//!
//! # Usage
//!
//! ```ignore
//! use voxmorph_test::RegParams;
//!
//! let mut rp = RegParams::new("label");
//! rp.compare_values(2.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;
pub mod reference;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
