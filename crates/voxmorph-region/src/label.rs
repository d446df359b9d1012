//! Component measurements
//!
//! This module provides counting and per-component measurements on label
//! maps produced by [`label_components`](crate::label_components).
//! Measurement vectors list the labels present in increasing order.

use std::collections::BTreeMap;

use crate::conncomp::{LabelValue, label_components};
use crate::error::RegionResult;
use voxmorph_core::{Array, Connectivity};

/// Count the number of connected components
///
/// # Arguments
///
/// * `image` - Binary array
/// * `connectivity` - Adjacency of foreground elements
///
/// # Returns
///
/// The number of foreground connected components.
///
/// # Errors
///
/// Returns `RegionError::ConnectivityMismatch` on a dimensionality mismatch.
pub fn count_components(image: &Array<bool>, connectivity: &Connectivity) -> RegionResult<u32> {
    let labels = label_components::<u32>(image, connectivity)?;
    Ok(max_label(&labels))
}

/// Axis-aligned bounding box of a component, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBounds {
    /// Smallest coordinate along each axis
    pub min: Vec<usize>,
    /// Largest coordinate along each axis
    pub max: Vec<usize>,
}

impl ComponentBounds {
    /// Extent along each axis
    pub fn extent(&self) -> Vec<usize> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| hi - lo + 1)
            .collect()
    }
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Number of elements
    pub size: usize,
    /// Bounding box
    pub bounds: ComponentBounds,
    /// Mean position along each axis
    pub centroid: Vec<f64>,
}

/// Get the element count for each component
///
/// One entry per label present in `labels`, in increasing label order.
/// For maps produced by [`label_components`] the labels are `1..=L`
/// without gaps, so the index corresponds to (label - 1).
pub fn component_sizes<L: LabelValue>(labels: &Array<L>) -> Vec<usize> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &l in labels.data() {
        let l: u64 = l.into();
        if l > 0 {
            *counts.entry(l).or_insert(0) += 1;
        }
    }
    counts.into_values().collect()
}

/// Get the bounding box of each component
///
/// Entries follow the same label order as [`component_sizes`].
pub fn component_bounds<L: LabelValue>(labels: &Array<L>) -> Vec<ComponentBounds> {
    component_stats(labels)
        .into_iter()
        .map(|stats| stats.bounds)
        .collect()
}

/// Get detailed statistics for all components
///
/// # Returns
///
/// One entry per label present in `labels`, in increasing label order.
/// Label values with no elements are skipped.
pub fn component_stats<L: LabelValue>(labels: &Array<L>) -> Vec<ComponentStats> {
    struct Accum {
        size: usize,
        min: Vec<usize>,
        max: Vec<usize>,
        sum: Vec<f64>,
    }

    let mut stats: BTreeMap<u64, Accum> = BTreeMap::new();
    for (i, pos) in labels.positions().enumerate() {
        let l: u64 = labels.at(i).into();
        if l == 0 {
            continue;
        }
        let acc = stats.entry(l).or_insert_with(|| Accum {
            size: 0,
            min: pos.clone(),
            max: pos.clone(),
            sum: vec![0.0; pos.len()],
        });
        acc.size += 1;
        for (d, &p) in pos.iter().enumerate() {
            acc.min[d] = acc.min[d].min(p);
            acc.max[d] = acc.max[d].max(p);
            acc.sum[d] += p as f64;
        }
    }

    stats
        .into_iter()
        .map(|(label, acc)| ComponentStats {
            label: label as u32,
            size: acc.size,
            centroid: acc.sum.iter().map(|&s| s / acc.size as f64).collect(),
            bounds: ComponentBounds {
                min: acc.min,
                max: acc.max,
            },
        })
        .collect()
}

fn max_label<L: LabelValue>(labels: &Array<L>) -> u32 {
    labels
        .data()
        .iter()
        .map(|&l| Into::<u64>::into(l))
        .max()
        .unwrap_or(0) as u32
}
