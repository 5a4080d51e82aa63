//! Linear and circular sequences.
//!
//! Both variants share one capability set (length, fragment,
//! reverse complement, circularity). A circular sequence is replaced by
//! its canonical rotation at construction, so equal cyclic content means
//! equal storage order. Fragments are always linear.
//!

use std::fmt;
use std::sync::Arc;
use itertools::Itertools;
use log::trace;

use crate::Coord;
use crate::Nucleotide;
use crate::SequenceError;
use crate::rotation::circular_slice;
use crate::rotation::rotate_left;
use crate::rotation::rotation_offset;

/// Geometry of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Linear,
    Circular,
}

/// An immutable run of nucleotides.
///
/// Equality and hashing are structural. Use `SequenceRef` when two
/// sequences with the same content must be told apart.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sequence {
    topology: Topology,
    nucleotides: Arc<[Nucleotide]>,
}

impl Sequence {
    /// Create a sequence of the given topology. Circular input is
    /// canonicalized.
    pub fn new<I>(topology: Topology, nucleotides: I) -> Self
    where
        I: IntoIterator<Item = Nucleotide>,
    {
        match topology {
            Topology::Linear => Self::linear(nucleotides),
            Topology::Circular => Self::circular(nucleotides),
        }
    }

    /// Create a linear sequence; storage order is input order.
    pub fn linear<I>(nucleotides: I) -> Self
    where
        I: IntoIterator<Item = Nucleotide>,
    {
        Sequence {
            topology: Topology::Linear,
            nucleotides: nucleotides.into_iter().collect(),
        }
    }

    /// Create a circular sequence stored in its canonical rotation.
    pub fn circular<I>(nucleotides: I) -> Self
    where
        I: IntoIterator<Item = Nucleotide>,
    {
        let nucs: Vec<Nucleotide> = nucleotides.into_iter().collect();
        let keys: Vec<_> = nucs.iter().map(|n| n.sort_key()).collect();
        let amount = rotation_offset(&keys);
        trace!("canonical rotation of {} bases: offset {amount}", nucs.len());
        Sequence {
            topology: Topology::Circular,
            nucleotides: rotate_left(&nucs, amount).into(),
        }
    }

    /// Parse a linear sequence from IUPAC letters.
    pub fn linear_from_str(codes: &str) -> Result<Self, SequenceError> {
        Ok(Self::linear(parse_codes(codes)?))
    }

    /// Parse a circular sequence from IUPAC letters.
    pub fn circular_from_str(codes: &str) -> Result<Self, SequenceError> {
        Ok(Self::circular(parse_codes(codes)?))
    }

    pub fn len(&self) -> usize {
        self.nucleotides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nucleotides.is_empty()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_circular(&self) -> bool {
        self.topology == Topology::Circular
    }

    /// Nucleotides in storage order (canonical order for circles).
    pub fn nucleotides(&self) -> &[Nucleotide] {
        &self.nucleotides
    }

    /// Extract `length` bases starting at `start` as a linear sequence.
    ///
    /// Linear: a plain slice, which must lie within the sequence.
    /// Circular: wraps around; `start` is taken modulo the length and
    /// `length` must not exceed it.
    pub fn fragment(&self, start: Coord, length: Coord) -> Result<Sequence, SequenceError> {
        match self.topology {
            Topology::Linear => {
                if length < 0 {
                    return Err(SequenceError::Geometry(format!("negative length {length}")));
                }
                if start < 0 {
                    return Err(SequenceError::Geometry(format!("negative start {start}")));
                }
                let (start, end) = (start as usize, start as usize + length as usize);
                if end > self.len() {
                    return Err(SequenceError::Geometry(format!(
                        "fragment [{start}, {end}) extends past {} bases",
                        self.len()
                    )));
                }
                Ok(Self::linear(self.nucleotides[start..end].iter().copied()))
            }
            Topology::Circular => {
                let frag = circular_slice(&self.nucleotides, start, length)?;
                Ok(Self::linear(frag))
            }
        }
    }

    /// Reverse the order and complement every base. Keeps the topology.
    pub fn reverse_complement(&self) -> Sequence {
        let rc = self.nucleotides.iter().rev().map(|n| n.complement());
        Self::new(self.topology, rc)
    }

    /// True iff `other` is the exact reverse complement of `self`.
    ///
    /// Only defined between linear runs (fragments); wildcards are
    /// compared as base sets.
    pub fn is_reverse_complement(&self, other: &Sequence) -> bool {
        if self.is_circular() || other.is_circular() || self.len() != other.len() {
            return false;
        }
        self.nucleotides
            .iter()
            .rev()
            .zip(other.nucleotides.iter())
            .all(|(s, o)| s.is_complement(o))
    }

    /// Structural comparison of the stored nucleotides. Sequences of
    /// different topology are never the same.
    pub fn has_same_nucleotides(&self, other: &Sequence) -> bool {
        self.topology == other.topology && self.nucleotides == other.nucleotides
    }

    /// Close a sequence into a circle.
    pub fn to_circular(&self) -> Sequence {
        Self::circular(self.nucleotides.iter().copied())
    }

    /// Open a sequence; circles are opened at their canonical origin.
    pub fn to_linear(&self) -> Sequence {
        Self::linear(self.nucleotides.iter().copied())
    }

    /// Join linear sequences end to end.
    pub fn concat(parts: &[&Sequence]) -> Result<Sequence, SequenceError> {
        if let Some(p) = parts.iter().find(|p| p.is_circular()) {
            return Err(SequenceError::Geometry(format!(
                "cannot concatenate a circular sequence of {} bases",
                p.len()
            )));
        }
        Ok(Self::linear(parts.iter().flat_map(|p| p.nucleotides.iter().copied())))
    }

    /// IUPAC letters in storage order.
    pub fn dump(&self) -> String {
        self.nucleotides.iter().map(|n| n.code()).join("")
    }
}

fn parse_codes(codes: &str) -> Result<Vec<Nucleotide>, SequenceError> {
    codes.chars().map(Nucleotide::from_code).collect()
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dump())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.topology {
            Topology::Linear => write!(f, "linear sequence of {} bases", self.len()),
            Topology::Circular => write!(f, "circular sequence of {} bases", self.len()),
        }
    }
}
