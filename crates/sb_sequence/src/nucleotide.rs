//! Nucleotide and SortKey definitions.
//!
//! A `Nucleotide` is a non-empty subset ("wildcard") of the bases
//! {A, C, G, T}, packed into the low four bits of a `u8`. Bit `i` is set
//! iff the `i`-th base in alphabetical order is part of the wildcard,
//! so A = 1, C = 2, G = 4, T = 8 and N = 15.
//!
//! All 15 non-empty wildcards have an IUPAC single-letter code. The
//! empty wildcard cannot be constructed and has no representation.
//!

use std::fmt;
use std::cmp::Ordering;

use crate::SequenceError;

pub const BASE_A: u8 = 1;
pub const BASE_C: u8 = 2;
pub const BASE_G: u8 = 4;
pub const BASE_T: u8 = 8;
pub const BASE_N: u8 = BASE_A | BASE_C | BASE_G | BASE_T;

/// IUPAC letter per wildcard mask; index 0 (empty wildcard) is unused.
const IUPAC_CODES: [char; 16] = [
    '-', 'A', 'C', 'M', 'G', 'R', 'S', 'V',
    'T', 'W', 'Y', 'H', 'K', 'D', 'B', 'N',
];

/// Returns the IUPAC letter of a wildcard mask.
pub fn iupac_code(wildcard: u8) -> Result<char, SequenceError> {
    if wildcard == 0 || wildcard > BASE_N {
        return Err(SequenceError::Representation(wildcard));
    }
    Ok(IUPAC_CODES[wildcard as usize])
}

fn base_mask(base: char) -> Option<u8> {
    match base.to_ascii_lowercase() {
        'a' => Some(BASE_A),
        'c' => Some(BASE_C),
        'g' => Some(BASE_G),
        't' => Some(BASE_T),
        _ => None,
    }
}

/// An immutable, ambiguity-coded base.
///
/// Equality and hashing compare the wildcard mask; pairing is tested with
/// `is_complement`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nucleotide {
    wildcard: u8,
}

impl Nucleotide {
    pub const A: Nucleotide = Nucleotide { wildcard: BASE_A };
    pub const C: Nucleotide = Nucleotide { wildcard: BASE_C };
    pub const G: Nucleotide = Nucleotide { wildcard: BASE_G };
    pub const T: Nucleotide = Nucleotide { wildcard: BASE_T };
    pub const N: Nucleotide = Nucleotide { wildcard: BASE_N };

    /// Build a nucleotide from the set of bases it may stand for, e.g.
    /// `"a"` or `"ct"`. Repeated bases are allowed, case is ignored.
    pub fn new(bases: &str) -> Result<Self, SequenceError> {
        let mut wildcard = 0;
        for base in bases.chars() {
            wildcard |= base_mask(base).ok_or_else(|| {
                SequenceError::Construction(format!("'{base}' is not one of A, C, G, T"))
            })?;
        }
        Self::from_wildcard(wildcard)
    }

    /// Build a nucleotide from a raw wildcard mask.
    pub fn from_wildcard(wildcard: u8) -> Result<Self, SequenceError> {
        match wildcard {
            0 => Err(SequenceError::Construction("empty wildcard".to_string())),
            w if w > BASE_N => Err(SequenceError::Construction(
                format!("wildcard mask {w:#x} out of range"),
            )),
            w => Ok(Nucleotide { wildcard: w }),
        }
    }

    /// Parse a single IUPAC letter (case-insensitive).
    pub fn from_code(code: char) -> Result<Self, SequenceError> {
        IUPAC_CODES
            .iter()
            .skip(1)
            .position(|&c| c == code.to_ascii_uppercase())
            .map(|i| Nucleotide { wildcard: (i + 1) as u8 })
            .ok_or_else(|| SequenceError::Construction(format!("unknown IUPAC code '{code}'")))
    }

    /// The raw 4-bit wildcard mask.
    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }

    /// The IUPAC letter of this nucleotide.
    pub fn code(&self) -> char {
        // Non-empty by construction.
        IUPAC_CODES[self.wildcard as usize]
    }

    /// True for A, C, G and T.
    pub fn is_concrete(&self) -> bool {
        self.wildcard.count_ones() == 1
    }

    /// Base-wise complement of the wildcard: A <-> T, C <-> G.
    pub fn complement(&self) -> Self {
        let w = self.wildcard;
        let swapped = ((w & BASE_A) << 3)
            | ((w & BASE_T) >> 3)
            | ((w & BASE_C) << 1)
            | ((w & BASE_G) >> 1);
        Nucleotide { wildcard: swapped }
    }

    /// True iff `other` stands for exactly the complements of `self`.
    pub fn is_complement(&self, other: &Nucleotide) -> bool {
        other.wildcard == self.complement().wildcard
    }

    /// Ordering key used for canonical rotation only.
    pub fn sort_key(&self) -> SortKey {
        SortKey::from(*self)
    }

    /// The concrete bases this nucleotide stands for, in alphabetical order.
    pub fn bases(&self) -> impl Iterator<Item = char> + '_ {
        ['A', 'C', 'G', 'T']
            .into_iter()
            .enumerate()
            .filter(|(i, _)| self.wildcard & (1 << i) != 0)
            .map(|(_, b)| b)
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = SequenceError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Nucleotide::from_code(code)
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Debug for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Deterministic total order over the 15 wildcards.
///
/// The key is the tuple of `2^i` for every base `i` present in the
/// wildcard, compared lexicographically (a proper prefix sorts first).
/// So `A < M < V < N < H < R < D < W < C < S < B < Y < G < K < T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    len: u8,
    bits: [u8; 4],
}

impl SortKey {
    pub fn as_slice(&self) -> &[u8] {
        &self.bits[..self.len as usize]
    }
}

impl From<Nucleotide> for SortKey {
    fn from(n: Nucleotide) -> Self {
        let mut bits = [0; 4];
        let mut len = 0;
        for i in 0..4 {
            let bit = 1 << i;
            if n.wildcard & bit != 0 {
                bits[len] = bit;
                len += 1;
            }
        }
        SortKey { len: len as u8, bits }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
