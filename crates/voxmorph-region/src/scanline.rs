//! Run-based flood fill along the fastest axis
//!
//! A fill claims the maximal contiguous span of claimable elements on the
//! seed's line (axis 0), then visits every neighboring line the
//! connectivity reaches and restarts from each claimable element found in
//! the overlapping span. Connectivities whose same-line neighbors are not
//! exactly `±1`, or whose reach into another line is not a contiguous range
//! of shifts, fall back to a plain element-by-element fill.

use voxmorph_core::{Connectivity, Shape};

/// Offsets into one neighboring line
#[derive(Debug, Clone)]
struct LineStep {
    /// Offset of the line along axes 1..
    slow: Vec<isize>,
    /// Linear distance between the two line starts
    delta: isize,
    /// Smallest and largest axis-0 shift into that line
    lo: isize,
    hi: isize,
}

/// Flood filler bound to one array shape and connectivity
pub(crate) struct ScanlineFill<'a> {
    shape: &'a Shape,
    steps: Vec<LineStep>,
    offsets: Vec<Vec<isize>>,
    regular: bool,
}

impl<'a> ScanlineFill<'a> {
    pub(crate) fn new(shape: &'a Shape, conn: &Connectivity) -> Self {
        let mut same_line = Vec::new();
        let mut grouped: Vec<(Vec<isize>, Vec<isize>)> = Vec::new();
        for off in conn.offsets() {
            let (dx, slow) = (off[0], &off[1..]);
            if slow.iter().all(|&s| s == 0) {
                same_line.push(dx);
                continue;
            }
            match grouped.iter_mut().find(|(s, _)| s == slow) {
                Some((_, dxs)) => dxs.push(dx),
                None => grouped.push((slow.to_vec(), vec![dx])),
            }
        }

        same_line.sort_unstable();
        let mut regular = same_line == [-1, 1];
        let mut steps = Vec::with_capacity(grouped.len());
        for (slow, mut dxs) in grouped {
            dxs.sort_unstable();
            regular &= dxs.windows(2).all(|w| w[1] == w[0] + 1);
            let delta = slow
                .iter()
                .zip(&shape.strides()[1..])
                .map(|(&s, &stride)| s * stride as isize)
                .sum();
            steps.push(LineStep {
                slow,
                delta,
                lo: dxs[0],
                hi: dxs[dxs.len() - 1],
            });
        }

        ScanlineFill {
            shape,
            steps,
            offsets: conn.offsets().map(<[isize]>::to_vec).collect(),
            regular,
        }
    }

    /// Whether the run-based fill applies to this connectivity
    #[cfg(test)]
    pub(crate) fn is_regular(&self) -> bool {
        self.regular
    }

    /// Fill the region connected to `seed`
    ///
    /// `claim(index)` must mark the element as filled and return `true` if
    /// it belongs to the region and was not filled yet, and return `false`
    /// otherwise. Returns the number of claimed elements.
    pub(crate) fn fill<F: FnMut(usize) -> bool>(&self, seed: usize, mut claim: F) -> usize {
        if !self.regular {
            return self.fill_elements(seed, claim);
        }
        if !claim(seed) {
            return 0;
        }

        let width = self.shape.dims()[0];
        let outer = &self.shape.dims()[1..];
        let coords = self.shape.position_of(seed);
        let base = seed - coords[0];
        let (left, right) = expand(base, coords[0], width, &mut claim);
        let mut count = right - left + 1;

        let mut stack = vec![(base, coords[1..].to_vec(), left, right)];
        while let Some((base, line, left, right)) = stack.pop() {
            for step in &self.steps {
                let Some(next) = shift_line(&line, &step.slow, outer) else {
                    continue;
                };
                let next_base = (base as isize + step.delta) as usize;
                let hi = (right as isize + step.hi).min(width as isize - 1);
                let mut x = (left as isize + step.lo).max(0);
                while x <= hi {
                    let xu = x as usize;
                    if claim(next_base + xu) {
                        let (l, r) = expand(next_base, xu, width, &mut claim);
                        count += r - l + 1;
                        stack.push((next_base, next.clone(), l, r));
                        x = r as isize + 1;
                    } else {
                        x += 1;
                    }
                }
            }
        }
        count
    }

    fn fill_elements<F: FnMut(usize) -> bool>(&self, seed: usize, mut claim: F) -> usize {
        if !claim(seed) {
            return 0;
        }
        let mut count = 1;
        let mut stack = vec![seed];
        let mut pos = vec![0; self.shape.ndim()];
        while let Some(i) = stack.pop() {
            self.shape.unravel_into(i, &mut pos);
            for off in &self.offsets {
                if let Some(j) = self.shape.offset_index(&pos, off)
                    && claim(j)
                {
                    count += 1;
                    stack.push(j);
                }
            }
        }
        count
    }
}

/// Grow a claimed element at `x` into the maximal claimable span of its line
fn expand<F: FnMut(usize) -> bool>(
    base: usize,
    x: usize,
    width: usize,
    claim: &mut F,
) -> (usize, usize) {
    let mut left = x;
    while left > 0 && claim(base + left - 1) {
        left -= 1;
    }
    let mut right = x;
    while right + 1 < width && claim(base + right + 1) {
        right += 1;
    }
    (left, right)
}

/// Line coordinates shifted by `step`, or `None` outside the array
fn shift_line(line: &[usize], step: &[isize], extents: &[usize]) -> Option<Vec<usize>> {
    line.iter()
        .zip(step)
        .zip(extents)
        .map(|((&c, &s), &d)| {
            let q = c as isize + s;
            (q >= 0 && (q as usize) < d).then_some(q as usize)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmorph_core::{Adjacency, Array};

    fn fill_from(image: &Array<bool>, conn: &Connectivity, seed: usize) -> (usize, Array<bool>) {
        let mut seen = Array::<bool>::new_like(image);
        let filler = ScanlineFill::new(image.shape(), conn);
        let count = filler.fill(seed, |j| {
            if image.at(j) && !seen.at(j) {
                seen.set_at(j, true);
                true
            } else {
                false
            }
        });
        (count, seen)
    }

    #[test]
    fn test_standard_connectivities_are_regular() {
        for conn in [
            Connectivity::four(),
            Connectivity::eight(),
            Connectivity::six(),
            Connectivity::twenty_six(),
            Connectivity::new(4, Adjacency::Face),
            Connectivity::new(4, Adjacency::Full),
        ] {
            let shape = Shape::new(&vec![3; conn.ndim()]).unwrap();
            assert!(ScanlineFill::new(&shape, &conn).is_regular());
        }
    }

    #[test]
    fn test_gapped_shifts_fall_back() {
        // Diagonals without the vertical neighbor leave a gap in the shifts
        let conn = Connectivity::from_offsets(
            2,
            &[
                vec![1, 0],
                vec![-1, 0],
                vec![1, 1],
                vec![-1, 1],
                vec![1, -1],
                vec![-1, -1],
            ],
        )
        .unwrap();
        let shape = Shape::new(&[4, 4]).unwrap();
        assert!(!ScanlineFill::new(&shape, &conn).is_regular());
    }

    #[test]
    fn test_u_shape_four_way() {
        let image = Array::from_rows(&["#...#", "#...#", "#####", "....."]).unwrap();
        let (count, seen) = fill_from(&image, &Connectivity::four(), 0);
        assert_eq!(count, 9);
        assert_eq!(seen, image);
    }

    #[test]
    fn test_diagonal_needs_eight() {
        let image = Array::from_rows(&["#..", ".#.", "..#"]).unwrap();
        assert_eq!(fill_from(&image, &Connectivity::four(), 0).0, 1);
        assert_eq!(fill_from(&image, &Connectivity::eight(), 0).0, 3);
    }

    #[test]
    fn test_unclaimable_seed() {
        let image = Array::from_rows(&[".#"]).unwrap();
        assert_eq!(fill_from(&image, &Connectivity::four(), 0).0, 0);
    }

    #[test]
    fn test_fallback_matches_offsets() {
        // Only vertical neighbors: columns are separate regions
        let conn = Connectivity::from_offsets(2, &[vec![0, 1], vec![0, -1]]).unwrap();
        let image = Array::from_rows(&["###", "###", "###"]).unwrap();
        let (count, seen) = fill_from(&image, &conn, 1);
        assert_eq!(count, 3);
        assert!(seen.get(&[1, 2]).unwrap());
        assert!(!seen.get(&[0, 0]).unwrap());
    }
}
