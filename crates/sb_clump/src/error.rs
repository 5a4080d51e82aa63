use thiserror::Error;
use sb_sequence::Coord;
use sb_sequence::SeqId;
use sb_sequence::SequenceError;

/// Error type for clump mutations and annealment validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClumpError {
    /// Fragment extraction failed on one of the annealed sequences.
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// An annealment needs exactly two sequences and two start points.
    #[error("must have two sequences and two start points (got {sequences} and {starts})")]
    InvalidAnnealmentArity { sequences: usize, starts: usize },

    /// Annealment length must be positive.
    #[error("length must be positive (got {0})")]
    Geometry(Coord),

    /// Annealment start points must be non-negative.
    #[error("start points must be non-negative (got {0})")]
    InvalidStart(Coord),

    /// The sequence is not a member of the clump.
    #[error("clump does not contain sequence s{0}")]
    UnknownSequence(SeqId),

    /// The two annealed regions are not reverse complements.
    #[error("sequences must be reverse complementary over annealment region ({0} vs {1})")]
    ComplementMismatch(String, String),

    /// The sequence is already a member of the clump.
    #[error("clump already contains sequence s{0}")]
    DuplicateSequence(SeqId),

    /// The new annealment overlaps an existing one.
    #[error("refusing to overwrite existing annealment on sequence s{0}")]
    AnnealmentConflict(SeqId),

    /// Replacing conflicting annealments has no defined semantics yet.
    #[error("overwriting existing annealments is not supported")]
    OverwriteUnsupported,
}

/// Error type for shape validation and operator dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// The clump does not satisfy the structural predicate of a shape.
    #[error("clump is not {shape}: {reason}")]
    Validation { shape: &'static str, reason: String },

    /// The operator is already declared on this shape.
    #[error("operator '{operator}' already declared on {shape}")]
    DuplicateOperatorDeclaration { shape: &'static str, operator: &'static str },

    /// Neither the shape nor any generalization declares the operator.
    #[error("unknown operator '{operator}' on {shape}")]
    UnknownOperator { shape: &'static str, operator: String },

    /// An operator returned a feature of the wrong kind.
    #[error("operator '{operator}' on {shape} returned {feature}")]
    FeatureMismatch { shape: &'static str, operator: &'static str, feature: String },

    /// Building a clump for a shape failed.
    #[error(transparent)]
    Clump(#[from] ClumpError),
}

impl From<SequenceError> for ShapeError {
    fn from(err: SequenceError) -> Self {
        ShapeError::Clump(ClumpError::Sequence(err))
    }
}
