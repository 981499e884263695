//! Multi-indices and the single-step moves between them.
//!
//! A multi-index `k = (k_0, ..., k_{n-1})` addresses one entry of a Hermite
//! tensor. The recursion only ever moves one step down: decrementing a
//! single positive coordinate.

use std::iter::FusedIterator;

/// Local index type (coordinate along one mode)
pub type LocalIndex = usize;

/// Multi-index type (one coordinate per mode)
pub type MultiIndex = Vec<LocalIndex>;

/// Total photon number of a multi-index (sum of its coordinates).
#[inline]
pub fn photon_number(idx: &[usize]) -> usize {
    idx.iter().sum()
}

/// Position of the first strictly positive coordinate.
///
/// This is the branch the recursion expands along; `None` only for the
/// all-zero multi-index.
#[inline]
pub fn first_positive(idx: &[usize]) -> Option<usize> {
    idx.iter().position(|&k| k > 0)
}

/// Copy of `idx` with coordinate `i` reduced by one.
///
/// # Panics
/// Panics if `idx[i] == 0` or `i` is out of range.
pub fn decrement_at(idx: &[usize], i: usize) -> MultiIndex {
    assert!(
        idx[i] > 0,
        "cannot decrement coordinate {i} of multi-index {idx:?}: it is already zero"
    );
    let mut out = idx.to_vec();
    out[i] -= 1;
    out
}

/// All ways to remove one photon from `idx`, in increasing position order.
///
/// Yields `(position, decrement_at(idx, position))` for every position with
/// a positive coordinate. The traversal has no side effects, so calling
/// `removable` again yields the same pairs.
pub fn removable(idx: &[usize]) -> Removable<'_> {
    Removable { idx, pos: 0 }
}

/// Iterator returned by [`removable`].
#[derive(Debug, Clone)]
pub struct Removable<'a> {
    idx: &'a [usize],
    pos: usize,
}

impl Iterator for Removable<'_> {
    type Item = (usize, MultiIndex);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.idx.len() {
            let p = self.pos;
            self.pos += 1;
            if self.idx[p] > 0 {
                return Some((p, decrement_at(self.idx, p)));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.idx.len() - self.pos))
    }
}

impl FusedIterator for Removable<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photon_number() {
        assert_eq!(photon_number(&[1, 0, 3]), 4);
        assert_eq!(photon_number(&[]), 0);
    }

    #[test]
    fn test_first_positive() {
        assert_eq!(first_positive(&[0, 0, 2, 1]), Some(2));
        assert_eq!(first_positive(&[0, 0]), None);
        assert_eq!(first_positive(&[]), None);
    }

    #[test]
    fn test_decrement_at() {
        let idx = vec![2, 1, 0];
        assert_eq!(decrement_at(&idx, 0), vec![1, 1, 0]);
        assert_eq!(decrement_at(&idx, 1), vec![2, 0, 0]);
        // original untouched
        assert_eq!(idx, vec![2, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "already zero")]
    fn test_decrement_at_zero_panics() {
        decrement_at(&[1, 0], 1);
    }

    #[test]
    fn test_removable() {
        let pairs: Vec<_> = removable(&[1, 0, 2]).collect();
        assert_eq!(pairs, vec![(0, vec![0, 0, 2]), (2, vec![1, 0, 1])]);
    }

    #[test]
    fn test_removable_restartable() {
        let idx = [3, 1];
        let first: Vec<_> = removable(&idx).collect();
        let second: Vec<_> = removable(&idx).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_removable_all_zero() {
        assert_eq!(removable(&[0, 0, 0]).count(), 0);
        assert_eq!(removable(&[]).count(), 0);
    }
}
