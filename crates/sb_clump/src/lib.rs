//! The sb_clump crate.
//!
//! Provides multi-strand DNA assemblies on top of `sb_sequence`:
//!  - Annealments (validated reverse-complement bindings)
//!  - Clumps (persistent, conflict-free assemblies)
//!  - Shapes (structural classification with typed accessors)
//!
//! Library-level shapes live in the `shapes` module:
//!  - GENERIC, LINEAR, DOUBLE_STRANDED, PCR_TEMPLATE, LINEAR_DOUBLE.
//!

/// Shape layer, the framework for extracting features out of clumps.
pub mod shape;

/// Concrete library shapes.
pub mod shapes;

/// Overlap geometry of annealed regions.
pub mod geometry;

mod error;
mod annealment;
mod clump;

pub use error::*;
pub use annealment::*;
pub use clump::*;

pub use sb_sequence::*;
