use thiserror::Error;

/// Error type for nucleotide and sequence construction and slicing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A wildcard was empty or contained something other than A, C, G, T.
    #[error("invalid nucleotide wildcard: {0}")]
    Construction(String),

    /// A wildcard mask has no IUPAC letter (only the empty mask).
    #[error("no representation for wildcard ({0:#06b})")]
    Representation(u8),

    /// Negative length, fragment past the end, or longer than a circle.
    #[error("geometry error: {0}")]
    Geometry(String),
}
