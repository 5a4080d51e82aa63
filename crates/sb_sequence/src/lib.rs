//! The sb_sequence crate.
//!
//! Provides the leaf representations of DNA used by synclump:
//!  - Nucleotides (IUPAC ambiguity codes)
//!  - Linear and circular sequences
//!  - Identity handles to shared sequences
//!
//! Circular sequences are stored in their canonical rotation, so two
//! circular sequences with the same cyclic content are structurally equal.
//!

mod error;
mod nucleotide;
mod rotation;
mod sequence;
mod handle;

pub use error::*;
pub use nucleotide::*;
pub use rotation::*;
pub use sequence::*;
pub use handle::*;


/// SeQuence InDeX: positions inside a sequence.
pub type SQIDX = usize;

/// Signed coordinate as accepted at the API boundary. Negative starts and
/// lengths are representable so they can be rejected with a proper error.
pub type Coord = isize;
