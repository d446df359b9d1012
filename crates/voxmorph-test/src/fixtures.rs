//! Reproducible random fixtures
//!
//! Every generator takes an explicit seed so that a failing regression run
//! can be replayed exactly.

use crate::error::{TestError, TestResult};
use rand::{Rng, SeedableRng, rngs::StdRng};
use voxmorph_core::Array;

fn fixture<T>(name: &str, result: voxmorph_core::Result<T>) -> TestResult<T> {
    result.map_err(|source| TestError::Fixture {
        name: name.to_string(),
        source,
    })
}

/// Random binary array where each element is foreground with probability
/// `density`
pub fn random_binary(dims: &[usize], density: f64, seed: u64) -> TestResult<Array<bool>> {
    let mut rng = StdRng::seed_from_u64(seed);
    fixture(
        "random_binary",
        Array::from_fn(dims, |_| rng.random_bool(density)),
    )
}

/// Random byte array with values in `0..=max`
pub fn random_u8(dims: &[usize], max: u8, seed: u64) -> TestResult<Array<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    fixture("random_u8", Array::from_fn(dims, |_| rng.random_range(0..=max)))
}

/// Random marker that never exceeds `mask`
///
/// About `1 - keep` of the elements are zeroed; the rest take a random value
/// between zero and the mask value.
pub fn random_marker_below(mask: &Array<u8>, keep: f64, seed: u64) -> Array<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    mask.map(|m| {
        if rng.random_bool(keep) {
            rng.random_range(0..=m)
        } else {
            0
        }
    })
}

/// Random marker that is never below `mask`
pub fn random_marker_above(mask: &Array<u8>, keep: f64, seed: u64) -> Array<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    mask.map(|m| {
        if rng.random_bool(keep) {
            rng.random_range(m..=u8::MAX)
        } else {
            u8::MAX
        }
    })
}

/// Binary marker keeping a random subset of the foreground of `mask`
pub fn random_subset(mask: &Array<bool>, keep: f64, seed: u64) -> Array<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    mask.map(|m| m && rng.random_bool(keep))
}

/// Isolated single-element components on a 2D grid
///
/// Places `count` foreground pixels on even coordinates of a grid wide
/// enough to hold them, so that no two are 8-connected.
pub fn isolated_points(count: usize) -> TestResult<Array<bool>> {
    let per_row = 32;
    let rows = count.div_ceil(per_row).max(1);
    let mut arr = fixture("isolated_points", Array::new(&[per_row * 2, rows * 2]))?;
    for i in 0..count {
        let pos = [(i % per_row) * 2, (i / per_row) * 2];
        fixture("isolated_points", arr.set(&pos, true))?;
    }
    Ok(arr)
}
