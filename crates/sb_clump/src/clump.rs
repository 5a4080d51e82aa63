//! Clump: an assembly of sequences held together by annealments.
//!
//! A `Clump` is a persistent value. Every mutator takes `&self` and
//! either returns a new `Clump` that shares the unchanged sequences and
//! annealments with `self`, or fails and leaves nothing changed.
//!
//! Invariants maintained by every mutator:
//!  1) no sequence appears twice (by identity),
//!  2) every annealment references member sequences only,
//!  3) no two annealments occupy overlapping regions of a shared sequence.
//!

use std::sync::Arc;
use itertools::Itertools;
use log::debug;
use nohash_hasher::IntSet;
use sb_sequence::Coord;
use sb_sequence::SQIDX;
use sb_sequence::SeqId;
use sb_sequence::SequenceRef;

use crate::Annealment;
use crate::ClumpError;

/// One annealment seen from one of its sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnealedRegion {
    pub start: SQIDX,
    pub length: SQIDX,
    pub partner: SequenceRef,
    pub partner_start: SQIDX,
}

#[derive(Debug, Clone, Default)]
pub struct Clump {
    sequences: Vec<SequenceRef>,
    annealments: Vec<Arc<Annealment>>,
}

impl Clump {
    /// An empty clump.
    pub fn new() -> Self {
        Self::default()
    }

    /// Member sequences in insertion order.
    pub fn sequences(&self) -> &[SequenceRef] {
        &self.sequences
    }

    /// Annealments in insertion order.
    pub fn annealments(&self) -> &[Arc<Annealment>] {
        &self.annealments
    }

    /// Number of member sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn contains(&self, seq: &SequenceRef) -> bool {
        self.sequences.contains(seq)
    }

    /// Position of `seq` in insertion order.
    pub fn locate_sequence(&self, seq: &SequenceRef) -> Option<usize> {
        self.sequences.iter().position(|s| s == seq)
    }

    /// Every annealment touching `seq`, seen from `seq`. A self-annealment
    /// shows up once per side.
    pub fn annealments_of(&self, seq: &SequenceRef) -> Vec<AnnealedRegion> {
        let mut out = Vec::new();
        for ann in &self.annealments {
            let [s0, s1] = ann.sequences();
            let [p0, p1] = ann.starts();
            if s0 == seq {
                out.push(AnnealedRegion { start: p0, length: ann.length(), partner: s1.clone(), partner_start: p1 });
            }
            if s1 == seq {
                out.push(AnnealedRegion { start: p1, length: ann.length(), partner: s0.clone(), partner_start: p0 });
            }
        }
        out
    }

    /// Add a new member sequence at the end.
    pub fn add_sequence(&self, new: SequenceRef) -> Result<Clump, ClumpError> {
        if self.contains(&new) {
            debug!("add_sequence rejected: s{} already present", new.id());
            return Err(ClumpError::DuplicateSequence(new.id()));
        }
        let mut sequences = self.sequences.clone();
        debug!("add_sequence: s{} ({:?})", new.id(), *new);
        sequences.push(new);
        Ok(Clump { sequences, annealments: self.annealments.clone() })
    }

    fn validate_pre_add_annealment(
        &self,
        sequences: &[SequenceRef],
        starts: &[Coord],
        length: Coord,
    ) -> Result<([SequenceRef; 2], [SQIDX; 2], SQIDX), ClumpError> {
        let (Ok([a, b]), Ok([s, t])) = (
            <&[SequenceRef; 2]>::try_from(sequences),
            <[Coord; 2]>::try_from(starts),
        ) else {
            return Err(ClumpError::InvalidAnnealmentArity {
                sequences: sequences.len(),
                starts: starts.len(),
            });
        };
        if length <= 0 {
            return Err(ClumpError::Geometry(length));
        }
        if let Some(&bad) = [s, t].iter().find(|&&x| x < 0) {
            return Err(ClumpError::InvalidStart(bad));
        }
        if let Some(missing) = [a, b].into_iter().find(|seq| !self.contains(seq)) {
            return Err(ClumpError::UnknownSequence(missing.id()));
        }
        Ok(([a.clone(), b.clone()], [s as SQIDX, t as SQIDX], length as SQIDX))
    }

    /// Declare that `length` bases of `sequences[0]` starting at
    /// `starts[0]` anneal to `length` bases of `sequences[1]` starting at
    /// `starts[1]`.
    ///
    /// Fails without changing anything if the request is malformed, the
    /// fragments are not reverse complements, or the new annealment
    /// overlaps an existing one on a shared sequence.
    pub fn add_annealment(
        &self,
        sequences: &[SequenceRef],
        starts: &[Coord],
        length: Coord,
    ) -> Result<Clump, ClumpError> {
        let new = self.build_annealment(sequences, starts, length)?;
        if let Some(shared) = self.annealments.iter().find_map(|old| new.conflict_with(old)) {
            debug!("add_annealment rejected: overlap on s{}", shared.id());
            return Err(ClumpError::AnnealmentConflict(shared.id()));
        }
        debug!(
            "add_annealment: s{}@{} ~ s{}@{} over {} bases",
            new.sequences()[0].id(),
            new.starts()[0],
            new.sequences()[1].id(),
            new.starts()[1],
            new.length()
        );
        let mut annealments = self.annealments.clone();
        annealments.push(Arc::new(new));
        Ok(Clump { sequences: self.sequences.clone(), annealments })
    }

    /// Like `add_annealment`, but asking to replace conflicting
    /// annealments. The request is validated in full and then refused:
    /// replacement has no defined semantics yet.
    pub fn add_annealment_overwrite(
        &self,
        sequences: &[SequenceRef],
        starts: &[Coord],
        length: Coord,
    ) -> Result<Clump, ClumpError> {
        self.build_annealment(sequences, starts, length)?;
        Err(ClumpError::OverwriteUnsupported)
    }

    fn build_annealment(
        &self,
        sequences: &[SequenceRef],
        starts: &[Coord],
        length: Coord,
    ) -> Result<Annealment, ClumpError> {
        let (sequences, starts, length) = self
            .validate_pre_add_annealment(sequences, starts, length)
            .inspect_err(|e| debug!("add_annealment rejected: {e}"))?;
        Annealment::new(sequences, starts, length)
            .inspect_err(|e| debug!("add_annealment rejected: {e}"))
    }

    /// Drop every annealment that references any of `sequences`.
    pub fn strip_annealments(&self, sequences: &[SequenceRef]) -> Clump {
        let ids: IntSet<SeqId> = sequences.iter().map(|s| s.id()).collect();
        let annealments: Vec<_> = self
            .annealments
            .iter()
            .filter(|ann| !ann.touches_any(&ids))
            .cloned()
            .collect();
        debug!(
            "strip_annealments: {} of {} annealments removed",
            self.annealments.len() - annealments.len(),
            self.annealments.len()
        );
        Clump { sequences: self.sequences.clone(), annealments }
    }

    /// Remove `old` together with every annealment referring to it.
    pub fn remove_sequence(&self, old: &SequenceRef) -> Result<Clump, ClumpError> {
        if !self.contains(old) {
            debug!("remove_sequence rejected: s{} not present", old.id());
            return Err(ClumpError::UnknownSequence(old.id()));
        }
        let stripped = self.strip_annealments(std::slice::from_ref(old));
        let sequences: Vec<_> = stripped.sequences.iter().filter(|s| *s != old).cloned().collect();
        debug!("remove_sequence: s{}", old.id());
        debug_assert!(stripped.annealments.iter().all(|ann| !ann.touches(old)));
        Ok(Clump { sequences, annealments: stripped.annealments })
    }

    /// Multi-line debug dump: one line per sequence, then the start pairs
    /// and lengths of all annealments.
    pub fn dump(&self) -> String {
        let starts = self
            .annealments
            .iter()
            .map(|ann| format!("({}, {})", ann.starts()[0], ann.starts()[1]))
            .join(", ");
        let lengths = self.annealments.iter().map(|ann| ann.length()).join(", ");
        self.sequences
            .iter()
            .map(|seq| format!("{:?}: {}", seq, seq.dump()))
            .chain([format!("starts: [{starts}]"), format!("lengths: [{lengths}]")])
            .join("\n")
    }
}
