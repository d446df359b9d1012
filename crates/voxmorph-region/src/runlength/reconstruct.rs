//! Binary reconstruction on run-length volumes
//!
//! Propagation works on whole runs: a queue of run handles grows the result
//! one mask run at a time and hands the newly covered span to the lines
//! above, below, in front and behind. Only lines sharing a face are
//! examined, so diagonal connections between lines (8- or 26-connectivity)
//! are not followed.

use super::{Run, RunLengthVolume};
use crate::error::{RegionResult, check_connectivity, check_same_dims};
use std::collections::VecDeque;
use voxmorph_core::{Adjacency, Connectivity, NoProgress, ProgressSink};

/// A run on a specific line, waiting to be grown into the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunHandle {
    run: Run,
    y: usize,
    z: usize,
}

/// Reconstruction by dilation of `marker` under `mask`
///
/// Lines are linked through shared faces only. A `connectivity` with
/// diagonal offsets is accepted but propagates like face adjacency; a
/// warning is logged in that case.
///
/// # Errors
///
/// Returns `RegionError::ShapeMismatch` if marker and mask differ in shape,
/// or `RegionError::ConnectivityMismatch` if the connectivity does not
/// match their dimensionality.
pub fn reconstruct_by_dilation_rle(
    marker: &RunLengthVolume,
    mask: &RunLengthVolume,
    connectivity: &Connectivity,
) -> RegionResult<RunLengthVolume> {
    reconstruct_by_dilation_rle_with_progress(marker, mask, connectivity, &NoProgress)
}

/// [`reconstruct_by_dilation_rle`] reporting to a progress sink
///
/// # Errors
///
/// See [`reconstruct_by_dilation_rle`].
pub fn reconstruct_by_dilation_rle_with_progress(
    marker: &RunLengthVolume,
    mask: &RunLengthVolume,
    connectivity: &Connectivity,
    progress: &dyn ProgressSink,
) -> RegionResult<RunLengthVolume> {
    check_same_dims(mask.dims(), marker.dims())?;
    check_connectivity(connectivity, mask.ndim())?;
    if !connectivity.is_subset_of(&Connectivity::new(mask.ndim(), Adjacency::Face)) {
        tracing::warn!(
            target: "voxmorph",
            offsets = connectivity.len(),
            "run-length reconstruction follows face-adjacent lines only"
        );
        progress.on_status("diagonal line connections are ignored");
    }

    progress.on_status("seed runs");
    let mut queue = VecDeque::new();
    for (y, z, row) in marker.rows() {
        if let Some(bound) = mask.row(y, z) {
            for &run in row.intersection(bound).runs() {
                queue.push_back(RunHandle { run, y, z });
            }
        }
    }
    let seeds = queue.len();

    progress.on_status("propagate runs");
    let mut result = RunLengthVolume::new_like(mask);
    let mut pops = 0usize;
    while let Some(handle) = queue.pop_front() {
        pops += 1;
        let RunHandle { run, y, z } = handle;
        if result.covers(y, z, run) {
            continue;
        }
        let Some(bound) = mask.row(y, z) else {
            continue;
        };
        for &grown in bound.intersecting_runs(run) {
            if result.covers(y, z, grown) {
                continue;
            }
            result.insert_run(y, z, grown);

            for (ny, nz) in mask.lateral_lines(y, z) {
                let Some(next) = mask.row(ny, nz) else {
                    continue;
                };
                for &candidate in next.intersecting_runs(grown) {
                    if !result.covers(ny, nz, candidate) {
                        queue.push_back(RunHandle {
                            run: candidate,
                            y: ny,
                            z: nz,
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(
        target: "voxmorph",
        seeds,
        pops,
        runs = result.run_count(),
        "run-length reconstruction finished"
    );
    Ok(result)
}

/// Fill enclosed background regions of a run-length image or volume
///
/// Background lines are linked through shared faces.
///
/// # Errors
///
/// Propagates errors of [`reconstruct_by_dilation_rle`].
pub fn fill_holes_rle(image: &RunLengthVolume) -> RegionResult<RunLengthVolume> {
    let background = image.complement();
    let connectivity = Connectivity::new(image.ndim(), Adjacency::Face);
    let outside =
        reconstruct_by_dilation_rle(&background.border_marker(), &background, &connectivity)?;
    Ok(outside.complement())
}

/// Remove foreground components of a run-length image or volume touching
/// its border
///
/// # Errors
///
/// Propagates errors of [`reconstruct_by_dilation_rle`].
pub fn kill_borders_rle(image: &RunLengthVolume) -> RegionResult<RunLengthVolume> {
    let connectivity = Connectivity::new(image.ndim(), Adjacency::Face);
    let touching = reconstruct_by_dilation_rle(&image.border_marker(), image, &connectivity)?;
    let mut result = RunLengthVolume::new_like(image);
    for (y, z, row) in image.rows() {
        let rest = match touching.row(y, z) {
            Some(cut) => row.difference(cut),
            None => row.clone(),
        };
        for &run in rest.runs() {
            result.insert_run(y, z, run);
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegionError;
    use voxmorph_core::Array;

    fn rle(rows: &[&str]) -> RunLengthVolume {
        RunLengthVolume::from_array(&Array::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_grows_through_runs() {
        let mask = rle(&["###..##", "..#...#", "..#####", "#......"]);
        let mut marker = RunLengthVolume::new_like(&mask);
        marker.set_range(0, 0, 0, 0).unwrap();

        let rec = reconstruct_by_dilation_rle(&marker, &mask, &Connectivity::four()).unwrap();
        let expected = rle(&["###..##", "..#...#", "..#####", "......."]);
        assert_eq!(rec, expected);
    }

    #[test]
    fn test_upward_propagation() {
        // Seed at the bottom must climb back up through a U
        let mask = rle(&["#...#", "#...#", "#####"]);
        let mut marker = RunLengthVolume::new_like(&mask);
        marker.set_range(0, 0, 4, 4).unwrap();
        let rec = reconstruct_by_dilation_rle(&marker, &mask, &Connectivity::four()).unwrap();
        assert_eq!(rec, mask);
    }

    #[test]
    fn test_marker_outside_mask_is_ignored() {
        let mask = rle(&["##...", "....."]);
        let marker = rle(&["...##", "#####"]);
        let rec = reconstruct_by_dilation_rle(&marker, &mask, &Connectivity::four()).unwrap();
        assert!(rec.is_empty());
    }

    #[test]
    fn test_diagonal_lines_not_followed() {
        let mask = rle(&["#.", ".#"]);
        let mut marker = RunLengthVolume::new_like(&mask);
        marker.set_range(0, 0, 0, 0).unwrap();
        let rec = reconstruct_by_dilation_rle(&marker, &mask, &Connectivity::eight()).unwrap();
        assert_eq!(rec.voxel_count(), 1);
    }

    #[test]
    fn test_rejects_mismatches() {
        let mask = rle(&["##", "##"]);
        let other = rle(&["###", "###"]);
        assert!(matches!(
            reconstruct_by_dilation_rle(&mask, &other, &Connectivity::four()),
            Err(RegionError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            reconstruct_by_dilation_rle(&mask, &mask, &Connectivity::six()),
            Err(RegionError::ConnectivityMismatch { .. })
        ));
    }

    #[test]
    fn test_fill_holes_rle() {
        let img = rle(&["#####", "#...#", "#.#.#", "#####", "....."]);
        let filled = fill_holes_rle(&img).unwrap();
        assert_eq!(filled.voxel_count(), 20);
        assert!(filled.get(&[1, 1]).unwrap());
        assert!(!filled.get(&[0, 4]).unwrap());
    }

    #[test]
    fn test_kill_borders_rle() {
        let img = rle(&["##...", ".....", "..##.", "..##.", "....#"]);
        let cleared = kill_borders_rle(&img).unwrap();
        assert_eq!(cleared.voxel_count(), 4);
        assert!(cleared.get(&[3, 3]).unwrap());
    }

    #[test]
    fn test_fill_and_kill_on_empty_image() {
        // No foreground: nothing to fill, nothing to clear
        let empty = rle(&[".....", ".....", "....."]);
        assert!(fill_holes_rle(&empty).unwrap().is_empty());
        assert!(kill_borders_rle(&empty).unwrap().is_empty());

        // Fully covered image: no border-connected background to keep out
        let full = empty.complement();
        assert_eq!(fill_holes_rle(&full).unwrap(), full);
        assert!(kill_borders_rle(&full).unwrap().is_empty());
    }
}
