//! Overlap of annealed regions.
//!
//! Regions are half-open runs `[start, start + length)` on one sequence.
//! On a linear sequence two regions overlap iff their intervals
//! intersect. On a circular sequence of length `L` each region is first
//! reduced modulo `L` and split at the wrap point into at most two
//! intervals; the regions overlap iff any pair of those intervals
//! intersects.
//!

use sb_sequence::SQIDX;
use sb_sequence::Topology;

/// A half-open run of bases on one sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: SQIDX,
    pub length: SQIDX,
}

impl Region {
    pub fn new(start: SQIDX, length: SQIDX) -> Self {
        Region { start, length }
    }

    pub fn end(&self) -> SQIDX {
        self.start + self.length
    }

    /// Intervals covered by this region on a circle of size `modulus`.
    pub fn wrapped(&self, modulus: usize) -> Vec<(SQIDX, SQIDX)> {
        if self.length == 0 || modulus == 0 {
            return Vec::new();
        }
        if self.length >= modulus {
            return vec![(0, modulus)];
        }
        let (s, e) = (self.start % modulus, self.end() % modulus);
        if s < e {
            return vec![(s, e)];
        }
        let mut out = vec![(s, modulus)];
        if e > 0 {
            out.push((0, e));
        }
        out
    }
}

/// Open-interval intersection test for `[s0, e0)` and `[s1, e1)`.
pub fn intervals_overlap((s0, e0): (SQIDX, SQIDX), (s1, e1): (SQIDX, SQIDX)) -> bool {
    s1 < e0 && s0 < e1
}

/// True iff `a` and `b` share at least one base on a sequence of the
/// given topology and length.
pub fn regions_overlap(topology: Topology, length: usize, a: Region, b: Region) -> bool {
    match topology {
        Topology::Linear => intervals_overlap((a.start, a.end()), (b.start, b.end())),
        Topology::Circular => {
            let (wa, wb) = (a.wrapped(length), b.wrapped(length));
            wa.iter().any(|&ia| wb.iter().any(|&ib| intervals_overlap(ia, ib)))
        }
    }
}
