//! Hybrid forward/backward/queue relaxation
//!
//! The result array must already hold the clamped marker. Two raster scans
//! then carry values downstream and upstream in one pass each; whatever the
//! backward scan leaves stale goes through a FIFO queue until no element can
//! improve any more.

use super::ReconstructionType;
use super::grid::{Half, NeighborGrid};
use std::collections::VecDeque;
use voxmorph_core::{Array, ProgressSink, Sample};

/// Work counters of one relaxation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxationStats {
    /// Elements changed by the forward scan
    pub forward_updates: usize,
    /// Elements changed by the backward scan
    pub backward_updates: usize,
    /// Elements changed while draining the queue
    pub queue_updates: usize,
    /// Queue entries processed
    pub queue_pops: usize,
}

/// Relax `result` to the reconstruction of its current content under `mask`
pub(crate) fn relax<T: Sample, G: NeighborGrid>(
    grid: &mut G,
    kind: ReconstructionType,
    mask: &Array<T>,
    result: &mut Array<T>,
    progress: &dyn ProgressSink,
) -> RelaxationStats {
    let n = result.len();
    let planes = mask.dims().last().copied().unwrap_or(1);
    let plane_len = n / planes;
    let mut stats = RelaxationStats::default();

    progress.on_status("forward scan");
    for i in 0..n {
        if i % plane_len == 0 {
            progress.on_progress(i / plane_len, planes);
        }
        let current = result.at(i);
        let mut value = current;
        grid.for_each_neighbor(i, Half::Forward, |j| {
            value = kind.combine(value, result.at(j));
        });
        let value = kind.clamp(value, mask.at(i));
        if kind.improves(value, current) {
            result.set_at(i, value);
            stats.forward_updates += 1;
        }
    }

    progress.on_status("backward scan");
    let mut queue = VecDeque::new();
    for i in (0..n).rev() {
        if i % plane_len == 0 {
            progress.on_progress(planes - i / plane_len, planes);
        }
        let current = result.at(i);
        let mut value = current;
        grid.for_each_neighbor(i, Half::Backward, |j| {
            value = kind.combine(value, result.at(j));
        });
        let value = kind.clamp(value, mask.at(i));
        if !kind.improves(value, current) {
            continue;
        }
        result.set_at(i, value);
        stats.backward_updates += 1;

        // Neighbors already visited by this scan may now be stale
        grid.for_each_neighbor(i, Half::Backward, |j| {
            if kind.improves(kind.clamp(value, mask.at(j)), result.at(j)) {
                queue.push_back(j);
            }
        });
    }

    progress.on_status("queue propagation");
    while let Some(i) = queue.pop_front() {
        stats.queue_pops += 1;
        let current = result.at(i);
        let mut value = current;
        grid.for_each_neighbor(i, Half::All, |j| {
            value = kind.combine(value, result.at(j));
        });
        let value = kind.clamp(value, mask.at(i));
        if !kind.improves(value, current) {
            continue;
        }
        result.set_at(i, value);
        stats.queue_updates += 1;

        grid.for_each_neighbor(i, Half::All, |j| {
            if kind.improves(kind.clamp(value, mask.at(j)), result.at(j)) {
                queue.push_back(j);
            }
        });
    }

    stats
}
