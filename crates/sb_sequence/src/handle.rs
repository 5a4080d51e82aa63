//! Identity handles for shared sequences.
//!
//! Clumps refer to their member sequences by identity, not by content:
//! two strands with identical bases are still two strands. A
//! `SequenceRef` pairs an `Arc<Sequence>` with a `SeqId` minted from a
//! process-wide, append-only counter. Cloning a handle keeps the id;
//! wrapping the same content twice yields two distinct handles.
//!

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use crate::Sequence;

/// Sequence identity key.
pub type SeqId = u64;

static NEXT_SEQ_ID: AtomicU64 = AtomicU64::new(0);

/// A cheap-to-clone handle to an immutable sequence.
#[derive(Clone)]
pub struct SequenceRef {
    id: SeqId,
    sequence: Arc<Sequence>,
}

impl SequenceRef {
    /// Register `sequence` under a fresh id.
    pub fn new(sequence: Sequence) -> Self {
        SequenceRef {
            id: NEXT_SEQ_ID.fetch_add(1, Ordering::Relaxed),
            sequence: Arc::new(sequence),
        }
    }

    pub fn id(&self) -> SeqId {
        self.id
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }
}

impl From<Sequence> for SequenceRef {
    fn from(sequence: Sequence) -> Self {
        SequenceRef::new(sequence)
    }
}

impl Deref for SequenceRef {
    type Target = Sequence;

    fn deref(&self) -> &Sequence {
        &self.sequence
    }
}

impl PartialEq for SequenceRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SequenceRef {}

impl Hash for SequenceRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SequenceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}: {:?}", self.id, self.sequence)
    }
}
