//! Seed fill operations
//!
//! Flood fill plus the classic applications of reconstruction: hole filling,
//! border clearing and removal of seeded components. All operations work on
//! arrays of any rank with a matching [`Connectivity`].

use crate::error::{RegionError, RegionResult, check_connectivity, check_same_dims};
use crate::reconstruct::{reconstruct_by_dilation, reconstruct_by_erosion};
use crate::scanline::ScanlineFill;
use voxmorph_core::{Array, Connectivity, Sample};

/// Flood fill starting from a seed position
///
/// Replaces the connected region of elements equal to the seed's value with
/// `value`. This modifies the array in place.
///
/// # Arguments
///
/// * `array` - Array to fill
/// * `seed` - Position of the seed element
/// * `value` - Value to fill with
/// * `connectivity` - Neighborhood defining the region
///
/// # Returns
///
/// The number of elements that were changed, 0 if the seed already holds
/// `value`.
///
/// # Errors
///
/// Returns `RegionError::InvalidSeed` if the seed lies outside the array and
/// `RegionError::ConnectivityMismatch` if the connectivity does not match the
/// array's dimensionality.
pub fn flood_fill<T: Sample>(
    array: &mut Array<T>,
    seed: &[usize],
    value: T,
    connectivity: &Connectivity,
) -> RegionResult<usize> {
    check_connectivity(connectivity, array.ndim())?;
    let start = array
        .shape()
        .index_of(seed)
        .ok_or_else(|| RegionError::InvalidSeed(seed.to_vec()))?;

    let old_value = array.at(start);
    if old_value == value {
        return Ok(0);
    }

    let shape = array.shape().clone();
    let filler = ScanlineFill::new(&shape, connectivity);
    let data = array.data_mut();
    Ok(filler.fill(start, |j| {
        if data[j] == old_value {
            data[j] = value;
            true
        } else {
            false
        }
    }))
}

/// Fill holes in an image
///
/// A hole is a region of values that cannot be reached from the array
/// border without climbing. For binary images this fills every background
/// region not connected to the border; for grayscale images it fills
/// regional minima not connected to the border up to their surrounding
/// level.
///
/// The result is the reconstruction by erosion of a marker that equals the
/// image on the border and `MAX_VALUE` elsewhere.
///
/// # Arguments
///
/// * `image` - Binary or grayscale image
/// * `connectivity` - Connectivity of the background (holes)
///
/// # Errors
///
/// Returns `RegionError::ConnectivityMismatch` if the connectivity does not
/// match the image's dimensionality.
pub fn fill_holes<T: Sample>(
    image: &Array<T>,
    connectivity: &Connectivity,
) -> RegionResult<Array<T>> {
    let mut marker = Array::with_shape(image.shape().clone(), T::MAX_VALUE);
    for (i, pos) in image.positions().enumerate() {
        if image.is_border(&pos) {
            marker.set_at(i, image.at(i));
        }
    }
    reconstruct_by_erosion(&marker, image, connectivity)
}

/// Remove foreground components touching the array border
///
/// # Errors
///
/// Returns `RegionError::ConnectivityMismatch` if the connectivity does not
/// match the image's dimensionality.
pub fn kill_borders(image: &Array<bool>, connectivity: &Connectivity) -> RegionResult<Array<bool>> {
    let seed = border_seed(image);
    remove_seeded_components(&seed, image, connectivity)
}

/// Remove every component of `mask` that contains a foreground seed element
///
/// Equivalent to `mask AND NOT reconstruct_by_dilation(seed, mask)`.
///
/// # Errors
///
/// Returns `RegionError::ShapeMismatch` if seed and mask differ in shape, or
/// `RegionError::ConnectivityMismatch` on a dimensionality mismatch.
pub fn remove_seeded_components(
    seed: &Array<bool>,
    mask: &Array<bool>,
    connectivity: &Connectivity,
) -> RegionResult<Array<bool>> {
    check_same_dims(mask.dims(), seed.dims())?;
    let reached = reconstruct_by_dilation(seed, mask, connectivity)?;

    let mut result = mask.clone();
    for (r, &hit) in result.data_mut().iter_mut().zip(reached.data()) {
        *r = *r && !hit;
    }
    Ok(result)
}

/// Foreground elements of `image` lying on its border
pub(crate) fn border_seed(image: &Array<bool>) -> Array<bool> {
    let mut seed = Array::<bool>::new_like(image);
    for (i, pos) in image.positions().enumerate() {
        if image.at(i) && image.is_border(&pos) {
            seed.set_at(i, true);
        }
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> Array<bool> {
        Array::from_rows(&[".....", ".###.", ".#.#.", ".###.", "....."]).unwrap()
    }

    #[test]
    fn test_flood_fill_basic() {
        let mut arr = Array::<u8>::new(&[5, 5]).unwrap();
        let count = flood_fill(&mut arr, &[2, 2], 7, &Connectivity::four()).unwrap();

        // All 25 elements should be filled
        assert_eq!(count, 25);
        assert!(arr.data().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_flood_fill_bounded() {
        let mut img = ring();

        // Fill outside the ring (from corner)
        let count = flood_fill(&mut img, &[0, 0], true, &Connectivity::four()).unwrap();
        assert_eq!(count, 16);

        // Interior should still be background
        assert!(!img.get(&[2, 2]).unwrap());
    }

    #[test]
    fn test_flood_fill_same_value() {
        let mut img = ring();
        let count = flood_fill(&mut img, &[1, 1], true, &Connectivity::four()).unwrap();
        assert_eq!(count, 0);
        assert_eq!(img, ring());
    }

    #[test]
    fn test_flood_fill_leaks_diagonally_with_eight() {
        let mut img = Array::from_rows(&["..#..", ".#.#.", "#...#", ".#.#.", "..#.."]).unwrap();
        let count = flood_fill(&mut img, &[2, 2], true, &Connectivity::four()).unwrap();
        assert_eq!(count, 5);

        let mut img = Array::from_rows(&["..#..", ".#.#.", "#...#", ".#.#.", "..#.."]).unwrap();
        let count = flood_fill(&mut img, &[2, 2], true, &Connectivity::eight()).unwrap();
        assert_eq!(count, 17);
    }

    #[test]
    fn test_invalid_seed() {
        let mut img = ring();
        let result = flood_fill(&mut img, &[5, 0], true, &Connectivity::four());
        assert!(matches!(result, Err(RegionError::InvalidSeed(_))));
    }

    #[test]
    fn test_fill_holes() {
        let filled = fill_holes(&ring(), &Connectivity::four()).unwrap();
        assert!(filled.get(&[2, 2]).unwrap());
        assert_eq!(filled.count(|v| v), 9);
    }

    #[test]
    fn test_fill_holes_gray_basin() {
        // A basin of depth 2 inside a rim of 5, edge at 3
        #[rustfmt::skip]
        let img = Array::from_vec(&[5, 5], vec![
            3, 3, 3, 3, 3,
            3, 5, 5, 5, 3,
            3, 5, 2, 5, 3,
            3, 5, 5, 5, 3,
            3, 3, 3, 3, 3u8,
        ])
        .unwrap();
        let filled = fill_holes(&img, &Connectivity::four()).unwrap();
        assert_eq!(filled.get(&[2, 2]).unwrap(), 5);
        assert_eq!(filled.get(&[0, 0]).unwrap(), 3);
    }

    #[test]
    fn test_kill_borders() {
        let img = Array::from_rows(&["##...", "#....", "..##.", "..##.", "....#"]).unwrap();
        let cleared = kill_borders(&img, &Connectivity::four()).unwrap();
        assert_eq!(cleared.count(|v| v), 4);
        assert!(cleared.get(&[2, 2]).unwrap());
        assert!(!cleared.get(&[0, 0]).unwrap());

        // With 8-connectivity the block reaches the corner pixel
        let cleared = kill_borders(&img, &Connectivity::eight()).unwrap();
        assert_eq!(cleared.count(|v| v), 0);
    }

    #[test]
    fn test_remove_seeded_components_shape_mismatch() {
        let seed = Array::<bool>::new(&[4, 4]).unwrap();
        let mask = Array::<bool>::new(&[4, 5]).unwrap();
        assert!(matches!(
            remove_seeded_components(&seed, &mask, &Connectivity::four()),
            Err(RegionError::ShapeMismatch { .. })
        ));
    }
}
