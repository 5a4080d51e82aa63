//! Library-level shapes.
//!
//! ```text
//!             GENERIC
//!            /       \
//!       LINEAR     DOUBLE_STRANDED
//!          |  \     /    |
//!          |   \   /     |
//!          |    \ /      |
//!          |     X       |
//!          |    / \      |
//!     PCR_TEMPLATE   LINEAR_DOUBLE
//! ```
//!

mod linear_double;

pub use linear_double::*;

use once_cell::sync::Lazy;

use crate::Clump;
use crate::Coord;
use crate::Sequence;
use crate::SequenceRef;
use crate::ShapeError;
use crate::shape::Feature;
use crate::shape::Operator;
use crate::shape::OperatorFn;
use crate::shape::ShapeInstance;
use crate::shape::ShapeType;
use crate::shape::Validator;

fn build(
    name: &'static str,
    generalizations: &[&'static ShapeType],
    validator: Validator,
    operators: &[(Operator, OperatorFn)],
) -> ShapeType {
    let mut shape = ShapeType::new(name, generalizations, validator);
    for &(op, func) in operators {
        shape
            .declare_operator(op, func)
            .expect("library shapes declare each operator once");
    }
    shape
}

/// Any clump.
pub static GENERIC: Lazy<ShapeType> = Lazy::new(|| {
    build("generic", &[], |_| Ok(()), &[(Operator::CountSequences, count_sequences as OperatorFn)])
});

/// All member sequences are linear.
pub static LINEAR: Lazy<ShapeType> =
    Lazy::new(|| build("linear", &[&*GENERIC], validate_linear, &[]));

/// Exactly two sequences, annealed to each other at least once.
pub static DOUBLE_STRANDED: Lazy<ShapeType> = Lazy::new(|| {
    build(
        "double stranded",
        &[&*GENERIC],
        validate_double_stranded,
        &[(Operator::SequenceLengths, sequence_lengths as OperatorFn)],
    )
});

/// A linear, double-stranded template, as built by `create_pcr_template`.
pub static PCR_TEMPLATE: Lazy<ShapeType> =
    Lazy::new(|| build("pcr template", &[&*LINEAR, &*DOUBLE_STRANDED], |_| Ok(()), &[]));

/// Two linear strands joined by exactly one annealment: a middle region
/// and four overhangs.
pub static LINEAR_DOUBLE: Lazy<ShapeType> = Lazy::new(|| {
    build(
        "linear double",
        &[&*LINEAR, &*DOUBLE_STRANDED],
        validate_linear_double,
        &[(Operator::LinearDouble, linear_double as OperatorFn)],
    )
});

fn validate_linear(clump: &Clump) -> Result<(), String> {
    if clump.sequences().iter().any(|s| s.is_circular()) {
        return Err("all sequences must be linear".to_string());
    }
    Ok(())
}

fn validate_double_stranded(clump: &Clump) -> Result<(), String> {
    let [a, b] = clump.sequences() else {
        return Err(format!("must have exactly two sequences (got {})", clump.len()));
    };
    if clump.annealments().is_empty() {
        return Err("must have at least one annealment".to_string());
    }
    if !clump.annealments().iter().any(|ann| ann.touches(a) && ann.touches(b)) {
        return Err("the two sequences must be annealed to each other".to_string());
    }
    Ok(())
}

fn validate_linear_double(clump: &Clump) -> Result<(), String> {
    if clump.annealments().len() != 1 {
        return Err(format!("must have exactly one annealment (got {})", clump.annealments().len()));
    }
    Ok(())
}

fn count_sequences(clump: &Clump) -> Result<Feature, ShapeError> {
    Ok(Feature::Count(clump.len()))
}

fn sequence_lengths(clump: &Clump) -> Result<Feature, ShapeError> {
    Ok(Feature::Lengths(clump.sequences().iter().map(|s| s.len()).collect()))
}

fn linear_double(clump: &Clump) -> Result<Feature, ShapeError> {
    Ok(Feature::LinearDouble(LinearDouble::analyze(clump)?))
}

/// A strand and its reverse complement, annealed over their full length.
pub fn create_pcr_template(bases: &str) -> Result<Clump, ShapeError> {
    let seq = SequenceRef::new(Sequence::linear_from_str(bases)?);
    let rseq = SequenceRef::new(seq.reverse_complement());
    let length = seq.len() as Coord;
    let clump = Clump::new()
        .add_sequence(seq.clone())?
        .add_sequence(rseq.clone())?
        .add_annealment(&[seq, rseq], &[0, 0], length)?;
    Ok(clump)
}

/// `create_pcr_template`, bound to PCR_TEMPLATE.
pub fn pcr_template(bases: &str) -> Result<ShapeInstance, ShapeError> {
    PCR_TEMPLATE.examine(create_pcr_template(bases)?)
}
