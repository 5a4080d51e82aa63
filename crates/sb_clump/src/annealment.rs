//! Annealment: a validated hybridization between two regions.
//!
//! An annealment binds `length` bases of one sequence, starting at
//! `starts[0]`, to `length` bases of another (or the same) sequence,
//! starting at `starts[1]`. The two fragments must be exact reverse
//! complements; on circular sequences the fragments wrap around.
//!

use nohash_hasher::IntSet;
use sb_sequence::Coord;
use sb_sequence::SQIDX;
use sb_sequence::SeqId;
use sb_sequence::SequenceRef;

use crate::ClumpError;
use crate::geometry::Region;
use crate::geometry::regions_overlap;

#[derive(Debug, Clone)]
pub struct Annealment {
    sequences: [SequenceRef; 2],
    starts: [SQIDX; 2],
    length: SQIDX,
}

impl Annealment {
    /// Build an annealment, checking reverse complementarity of the two
    /// designated fragments.
    pub fn new(
        sequences: [SequenceRef; 2],
        starts: [SQIDX; 2],
        length: SQIDX,
    ) -> Result<Self, ClumpError> {
        let f0 = sequences[0].fragment(starts[0] as Coord, length as Coord)?;
        let f1 = sequences[1].fragment(starts[1] as Coord, length as Coord)?;
        if !f0.is_reverse_complement(&f1) {
            return Err(ClumpError::ComplementMismatch(f0.dump(), f1.dump()));
        }
        Ok(Annealment { sequences, starts, length })
    }

    pub fn sequences(&self) -> &[SequenceRef; 2] {
        &self.sequences
    }

    pub fn starts(&self) -> [SQIDX; 2] {
        self.starts
    }

    pub fn length(&self) -> SQIDX {
        self.length
    }

    /// Exclusive end coordinates (not reduced modulo circle length).
    pub fn ends(&self) -> [SQIDX; 2] {
        [self.starts[0] + self.length, self.starts[1] + self.length]
    }

    /// The region occupied on side `0` or `1`.
    pub fn region(&self, side: usize) -> Region {
        Region::new(self.starts[side], self.length)
    }

    /// True if either side references `seq`.
    pub fn touches(&self, seq: &SequenceRef) -> bool {
        self.sequences.iter().any(|s| s == seq)
    }

    /// True if either side references a sequence in `ids`.
    pub fn touches_any(&self, ids: &IntSet<SeqId>) -> bool {
        self.sequences.iter().any(|s| ids.contains(&s.id()))
    }

    /// Returns the shared sequence on which `self` and `other` occupy
    /// overlapping regions, if any.
    pub fn conflict_with(&self, other: &Annealment) -> Option<&SequenceRef> {
        for s in 0..2 {
            for o in 0..2 {
                let common = &self.sequences[s];
                if common != &other.sequences[o] {
                    continue;
                }
                if regions_overlap(common.topology(), common.len(), self.region(s), other.region(o)) {
                    return Some(common);
                }
            }
        }
        None
    }

    pub fn has_overlap(&self, other: &Annealment) -> bool {
        self.conflict_with(other).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_sequence::Sequence;
    use sb_sequence::SequenceError;

    fn lin(s: &str) -> SequenceRef {
        Sequence::linear_from_str(s).unwrap().into()
    }

    fn circ(s: &str) -> SequenceRef {
        Sequence::circular_from_str(s).unwrap().into()
    }

    #[test]
    fn test_valid_annealment() {
        let (a, b) = (lin("agctg"), circ("gctca"));
        let ann = Annealment::new([a.clone(), b.clone()], [0, 2], 2).unwrap();
        assert_eq!(ann.starts(), [0, 2]);
        assert_eq!(ann.ends(), [2, 4]);
        assert_eq!(ann.length(), 2);
        assert!(ann.touches(&a));
        assert!(ann.touches(&b));
        assert!(!ann.touches(&lin("agctg")));
    }

    #[test]
    fn test_complement_mismatch() {
        let (a, b) = (lin("agctg"), circ("gctca"));
        let err = Annealment::new([a, b], [0, 0], 2).unwrap_err();
        assert_eq!(err, ClumpError::ComplementMismatch("AG".to_string(), "AG".to_string()));
    }

    #[test]
    fn test_wildcards_compare_as_sets() {
        let (a, b) = (lin("mg"), lin("ck"));
        assert!(Annealment::new([a.clone(), b.clone()], [0, 0], 2).is_ok());
        // N is not the complement of a concrete base.
        let c = lin("cn");
        assert!(matches!(
            Annealment::new([a, c], [0, 0], 2),
            Err(ClumpError::ComplementMismatch(_, _))
        ));
    }

    #[test]
    fn test_fragment_out_of_range() {
        let (a, b) = (lin("agctg"), circ("gctca"));
        assert!(matches!(
            Annealment::new([a.clone(), b.clone()], [4, 0], 2),
            Err(ClumpError::Sequence(SequenceError::Geometry(_)))
        ));
        assert!(matches!(
            Annealment::new([a, b], [0, 0], 6),
            Err(ClumpError::Sequence(SequenceError::Geometry(_)))
        ));
    }

    #[test]
    fn test_overlap_only_on_shared_sequence() {
        let (a, b, c) = (lin("agctg"), lin("cagct"), lin("cagct"));
        let ab = Annealment::new([a.clone(), b], [0, 0], 5).unwrap();
        let ac = Annealment::new([a.clone(), c.clone()], [0, 0], 5).unwrap();
        assert_eq!(ab.conflict_with(&ac), Some(&a));
        assert!(ac.has_overlap(&ab));
        let lone = lin("agctg");
        let other = Annealment::new([lone, c], [1, 1], 3).unwrap();
        assert!(!other.has_overlap(&ab));
    }
}
