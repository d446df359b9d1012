//! Reference algorithms used as test oracles
//!
//! These favor obviousness over speed: plain breadth-first traversal and
//! whole-array relaxation sweeps repeated until nothing changes.

use std::collections::VecDeque;
use voxmorph_core::{Array, Connectivity, Sample};

/// Label connected foreground components by breadth-first traversal
///
/// Labels start at 1 and follow the raster order of each component's first
/// element.
pub fn bfs_labels(image: &Array<bool>, conn: &Connectivity) -> Array<u32> {
    let shape = image.shape();
    let mut labels = Array::<u32>::new_like(image);
    let mut next = 0u32;
    let mut queue = VecDeque::new();

    for start in 0..image.len() {
        if !image.at(start) || labels.at(start) != 0 {
            continue;
        }
        next += 1;
        labels.set_at(start, next);
        queue.push_back(start);

        while let Some(index) = queue.pop_front() {
            let pos = shape.position_of(index);
            for off in conn.offsets() {
                if let Some(j) = shape.offset_index(&pos, off)
                    && image.at(j)
                    && labels.at(j) == 0
                {
                    labels.set_at(j, next);
                    queue.push_back(j);
                }
            }
        }
    }

    labels
}

/// Whether two label maps induce the same partition of the foreground
///
/// Background (zero) must coincide, and the label correspondence must be a
/// bijection.
pub fn same_partition<A, B>(a: &Array<A>, b: &Array<B>) -> bool
where
    A: Sample + Into<u64>,
    B: Sample + Into<u64>,
{
    use std::collections::HashMap;

    if a.dims() != b.dims() {
        return false;
    }
    let mut forward: HashMap<u64, u64> = HashMap::new();
    let mut backward: HashMap<u64, u64> = HashMap::new();
    for (&la, &lb) in a.data().iter().zip(b.data()) {
        let (la, lb): (u64, u64) = (la.into(), lb.into());
        if (la == 0) != (lb == 0) {
            return false;
        }
        if la == 0 {
            continue;
        }
        if *forward.entry(la).or_insert(lb) != lb || *backward.entry(lb).or_insert(la) != la {
            return false;
        }
    }
    true
}

/// Reconstruction by dilation through repeated full sweeps
///
/// Each sweep replaces every element by the maximum over itself and its
/// neighbors, clamped by the mask, until a sweep changes nothing.
pub fn naive_reconstruct_by_dilation<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    conn: &Connectivity,
) -> Array<T> {
    naive_sweeps(marker, mask, conn, T::max_of, T::min_of)
}

/// Reconstruction by erosion through repeated full sweeps
pub fn naive_reconstruct_by_erosion<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    conn: &Connectivity,
) -> Array<T> {
    naive_sweeps(marker, mask, conn, T::min_of, T::max_of)
}

fn naive_sweeps<T: Sample>(
    marker: &Array<T>,
    mask: &Array<T>,
    conn: &Connectivity,
    combine: fn(T, T) -> T,
    clamp: fn(T, T) -> T,
) -> Array<T> {
    let shape = marker.shape();
    let mut current = marker.clone();
    for i in 0..current.len() {
        current.set_at(i, clamp(marker.at(i), mask.at(i)));
    }

    loop {
        let mut next = current.clone();
        let mut changed = false;
        for (i, pos) in shape.positions().enumerate() {
            let mut v = current.at(i);
            for off in conn.offsets() {
                if let Some(j) = shape.offset_index(&pos, off) {
                    v = combine(v, current.at(j));
                }
            }
            let v = clamp(v, mask.at(i));
            if v != current.at(i) {
                next.set_at(i, v);
                changed = true;
            }
        }
        current = next;
        if !changed {
            return current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfs_labels_two_blocks() {
        let img = Array::from_rows(&["##..", "##..", "..#."]).unwrap();
        let l4 = bfs_labels(&img, &Connectivity::four());
        assert_eq!(l4.data().iter().max(), Some(&2));
        let l8 = bfs_labels(&img, &Connectivity::eight());
        assert_eq!(l8.data().iter().max(), Some(&1));
    }

    #[test]
    fn test_same_partition_relabeled() {
        let a = Array::from_vec(&[4], vec![1u32, 0, 2, 2]).unwrap();
        let b = Array::from_vec(&[4], vec![7u8, 0, 3, 3]).unwrap();
        let c = Array::from_vec(&[4], vec![7u8, 0, 7, 3]).unwrap();
        assert!(same_partition(&a, &b));
        assert!(!same_partition(&a, &c));
    }

    #[test]
    fn test_naive_reconstruction_plus() {
        let mask = Array::from_rows(&[".#.", "###", ".#."]).unwrap();
        let mut marker = Array::<bool>::new_like(&mask);
        marker.set(&[1, 1], true).unwrap();
        let rec = naive_reconstruct_by_dilation(&marker, &mask, &Connectivity::four());
        assert_eq!(rec, mask);
    }
}
