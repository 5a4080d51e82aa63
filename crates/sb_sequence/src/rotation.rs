//! Canonical rotation and wrap-around slicing of circular runs.
//!
//! The n-step left rotation of `items` is `items[n..] ++ items[..n]`.
//!

use log::trace;

use crate::Coord;
use crate::SequenceError;

/// Returns the left-rotation amount that makes `keys` lexicographically
/// smallest.
///
/// Starts with every offset as a candidate and, at increasing depth,
/// keeps only those candidates whose key at `(offset + depth) mod n` is
/// minimal. Stops when a single candidate is left or the depth reaches
/// `n`. A periodic run keeps several candidates; the smallest offset wins.
pub fn rotation_offset<K: Ord>(keys: &[K]) -> usize {
    let n = keys.len();
    let mut candidates: Vec<usize> = (0..n).collect();
    let mut depth = 0;
    while depth < n && candidates.len() > 1 {
        let Some(lightest) = candidates.iter().map(|&c| &keys[(c + depth) % n]).min() else {
            break;
        };
        candidates.retain(|&c| &keys[(c + depth) % n] == lightest);
        depth += 1;
    }
    trace!("rotation_offset: n={n}, depth={depth}, candidates={candidates:?}");
    candidates.first().copied().unwrap_or(0)
}

/// Returns `items` rotated left by `amount` (taken modulo the length).
pub fn rotate_left<T: Clone>(items: &[T], amount: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let amount = amount % items.len();
    items[amount..].iter().chain(&items[..amount]).cloned().collect()
}

/// Returns `length` consecutive items starting at `start`, treating
/// `items` as circular. The start is taken modulo the length.
pub fn circular_slice<T: Clone>(
    items: &[T],
    start: Coord,
    length: Coord,
) -> Result<Vec<T>, SequenceError> {
    let n = items.len();
    if length == 0 {
        return Ok(Vec::new());
    }
    if n == 0 {
        return Err(SequenceError::Geometry("fragment of an empty circle".to_string()));
    }
    if length < 0 {
        return Err(SequenceError::Geometry(format!("negative length {length}")));
    }
    if length as usize > n {
        return Err(SequenceError::Geometry(format!(
            "length {length} exceeds circular sequence of {n} bases"
        )));
    }
    let start = start.rem_euclid(n as Coord) as usize;
    Ok(items.iter().cycle().skip(start).take(length as usize).cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rotation_offset_simple() {
        assert_eq!(rotation_offset::<u8>(&[]), 0);
        assert_eq!(rotation_offset(&[7]), 0);
        assert_eq!(rotation_offset(&[3, 1, 2]), 1);
        assert_eq!(rotation_offset(&[2, 1, 2, 1, 1]), 3);
        assert_eq!(rotation_offset(&[1, 2, 1, 3]), 0);
        assert_eq!(rotation_offset(&[1, 3, 1, 2]), 2);
    }

    #[test]
    fn test_rotation_offset_periodic() {
        // Every offset of a constant run is minimal; the first one wins.
        assert_eq!(rotation_offset(&[5, 5, 5, 5]), 0);
        assert_eq!(rotation_offset(&[2, 1, 2, 1]), 1);
        assert_eq!(rotation_offset(&[2, 1, 3, 2, 1, 3]), 1);
    }

    #[test]
    fn test_rotation_invariance_random() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = rng.random_range(1..30);
            let seq: Vec<u8> = (0..n).map(|_| rng.random_range(0..3)).collect();
            let canonical = rotate_left(&seq, rotation_offset(&seq));
            for k in 0..n {
                let rotated = rotate_left(&seq, k);
                let again = rotate_left(&rotated, rotation_offset(&rotated));
                assert_eq!(again, canonical, "seq={seq:?}, k={k}");
            }
            // The canonical form is the smallest of all rotations.
            let smallest = (0..n).map(|k| rotate_left(&seq, k)).min().unwrap();
            assert_eq!(canonical, smallest);
        }
    }

    #[test]
    fn test_rotate_left() {
        assert_eq!(rotate_left(&[1, 2, 3, 4], 1), vec![2, 3, 4, 1]);
        assert_eq!(rotate_left(&[1, 2, 3, 4], 5), vec![2, 3, 4, 1]);
        assert_eq!(rotate_left(&[1, 2, 3, 4], 0), vec![1, 2, 3, 4]);
        assert!(rotate_left::<u8>(&[], 3).is_empty());
    }

    #[test]
    fn test_circular_slice() {
        let items = [0, 1, 2, 3, 4];
        assert_eq!(circular_slice(&items, 1, 3).unwrap(), vec![1, 2, 3]);
        assert_eq!(circular_slice(&items, 3, 4).unwrap(), vec![3, 4, 0, 1]);
        assert_eq!(circular_slice(&items, 7, 2).unwrap(), vec![2, 3]);
        assert_eq!(circular_slice(&items, -1, 2).unwrap(), vec![4, 0]);
        assert_eq!(circular_slice(&items, 2, 5).unwrap(), vec![2, 3, 4, 0, 1]);
        assert!(circular_slice(&items, 2, 0).unwrap().is_empty());
        assert!(circular_slice::<u8>(&[], 3, 0).unwrap().is_empty());
        assert!(circular_slice::<u8>(&[], 0, 1).is_err());
        assert!(circular_slice(&items, 0, 6).is_err());
        assert!(circular_slice(&items, 0, -1).is_err());
    }

    #[test]
    fn test_circular_slice_exhaustive() {
        let items: Vec<usize> = (0..7).collect();
        let n = items.len();
        for start in 0..n {
            for length in 0..=n {
                let frag = circular_slice(&items, start as Coord, length as Coord).unwrap();
                assert_eq!(frag.len(), length);
                for (k, &x) in frag.iter().enumerate() {
                    assert_eq!(x, (start + k) % n);
                }
            }
        }
    }
}
