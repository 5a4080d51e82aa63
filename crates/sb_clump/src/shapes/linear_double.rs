//! Parts of a linear double-stranded molecule.
//!
//! Two linear strands joined by a single annealment split into five
//! pieces: the annealed middle (as read on the top strand) and the
//! unpaired 5' and 3' ends of both strands.
//!
//! ```text
//!   top:     5' [top5][    middle    ][top3] 3'
//!   bottom:  5' [bottom5][revcomp(middle)][bottom3] 3'
//! ```
//!

use std::fmt;

use crate::Clump;
use crate::Coord;
use crate::Sequence;
use crate::SequenceError;
use crate::SequenceRef;
use crate::ShapeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearDouble {
    middle: Sequence,
    top5: Sequence,
    top3: Sequence,
    bottom5: Sequence,
    bottom3: Sequence,
}

fn invalid(reason: impl Into<String>) -> ShapeError {
    ShapeError::Validation { shape: "linear double", reason: reason.into() }
}

fn ensure_linear(part: &str, seq: &Sequence) -> Result<(), ShapeError> {
    if seq.is_circular() {
        return Err(invalid(format!("{part} must be linear")));
    }
    Ok(())
}

/// Cut `seq` around `[start, start + length)` into the 5' end, the
/// region itself and the 3' end.
fn split(seq: &Sequence, start: usize, length: usize) -> Result<[Sequence; 3], SequenceError> {
    let tail = seq.len().saturating_sub(start + length);
    Ok([
        seq.fragment(0, start as Coord)?,
        seq.fragment(start as Coord, length as Coord)?,
        seq.fragment((start + length) as Coord, tail as Coord)?,
    ])
}

impl LinearDouble {
    /// No middle and no overhangs.
    pub fn empty() -> Self {
        let none = || Sequence::linear(std::iter::empty());
        LinearDouble {
            middle: none(),
            top5: none(),
            top3: none(),
            bottom5: none(),
            bottom3: none(),
        }
    }

    /// Decompose a clump of two linear sequences joined by exactly one
    /// annealment. The first member sequence is the top strand.
    pub fn analyze(clump: &Clump) -> Result<LinearDouble, ShapeError> {
        let [top, bottom] = clump.sequences() else {
            return Err(invalid(format!("must have exactly two sequences (got {})", clump.len())));
        };
        let [ann] = clump.annealments() else {
            return Err(invalid(format!(
                "must have exactly one annealment (got {})",
                clump.annealments().len()
            )));
        };
        ensure_linear("top strand", top)?;
        ensure_linear("bottom strand", bottom)?;

        let [s0, s1] = ann.sequences();
        let [p0, p1] = ann.starts();
        let (top_start, bottom_start) = if s0 == top && s1 == bottom {
            (p0, p1)
        } else if s0 == bottom && s1 == top {
            (p1, p0)
        } else {
            return Err(invalid("the annealment must join the two strands"));
        };

        let [top5, middle, top3] = split(top, top_start, ann.length())?;
        let [bottom5, _, bottom3] = split(bottom, bottom_start, ann.length())?;
        Ok(LinearDouble { middle, top5, top3, bottom5, bottom3 })
    }

    /// The annealed region, read along the top strand.
    pub fn middle(&self) -> &Sequence {
        &self.middle
    }

    pub fn top5(&self) -> &Sequence {
        &self.top5
    }

    pub fn top3(&self) -> &Sequence {
        &self.top3
    }

    pub fn bottom5(&self) -> &Sequence {
        &self.bottom5
    }

    pub fn bottom3(&self) -> &Sequence {
        &self.bottom3
    }

    /// Same overhangs, new middle.
    pub fn with_middle(&self, middle: Sequence) -> Result<LinearDouble, ShapeError> {
        ensure_linear("middle", &middle)?;
        Ok(LinearDouble { middle, ..self.clone() })
    }

    /// Same middle, new overhangs.
    pub fn with_overhangs(
        &self,
        top5: Sequence,
        top3: Sequence,
        bottom5: Sequence,
        bottom3: Sequence,
    ) -> Result<LinearDouble, ShapeError> {
        for (part, seq) in [("top5", &top5), ("top3", &top3), ("bottom5", &bottom5), ("bottom3", &bottom3)] {
            ensure_linear(part, seq)?;
        }
        Ok(LinearDouble { middle: self.middle.clone(), top5, top3, bottom5, bottom3 })
    }

    /// Rebuild the two strands and anneal them over the middle. Fails for
    /// an empty middle, since an annealment needs at least one base.
    pub fn to_clump(&self) -> Result<Clump, ShapeError> {
        let top = Sequence::concat(&[&self.top5, &self.middle, &self.top3])?;
        let rc = self.middle.reverse_complement();
        let bottom = Sequence::concat(&[&self.bottom5, &rc, &self.bottom3])?;
        let (top, bottom) = (SequenceRef::new(top), SequenceRef::new(bottom));
        let starts = [self.top5.len() as Coord, self.bottom5.len() as Coord];
        let clump = Clump::new()
            .add_sequence(top.clone())?
            .add_sequence(bottom.clone())?
            .add_annealment(&[top, bottom], &starts, self.middle.len() as Coord)?;
        Ok(clump)
    }
}

impl fmt::Display for LinearDouble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "top:    {}|{}|{}", self.top5, self.middle, self.top3)?;
        write!(
            f,
            "bottom: {}|{}|{}",
            self.bottom5,
            self.middle.reverse_complement(),
            self.bottom3
        )
    }
}
