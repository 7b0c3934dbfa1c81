//! Dense row-major indexing of a `D`-dimensional box of cells.

use crate::geom::Coord;

/// The shape of a dense lattice: cell counts per axis.
///
/// Cells are stored row-major with axis 0 varying fastest, so the index of
/// `(x, y, z)` is `x + y * w + z * w * h`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lattice<const D: usize> {
    dims: [i32; D],
    strides: [usize; D],
    len: usize,
}

impl<const D: usize> Lattice<D> {
    /// Create a lattice with the given cell counts.
    ///
    /// Non-positive counts produce an empty lattice.
    pub fn new(dims: [i32; D]) -> Self {
        let mut strides = [0usize; D];
        let len = match Self::checked_len(dims) {
            Some(len) => {
                let mut acc = 1usize;
                for (s, d) in strides.iter_mut().zip(dims) {
                    *s = acc;
                    acc *= d as usize;
                }
                len
            }
            None => 0,
        };
        Self { dims, strides, len }
    }

    /// Total cell count for `dims`, or `None` if any axis is non-positive or
    /// the product overflows `usize`.
    pub fn checked_len(dims: [i32; D]) -> Option<usize> {
        dims.iter().try_fold(1usize, |acc, &d| {
            if d <= 0 {
                return None;
            }
            acc.checked_mul(d as usize)
        })
    }

    /// Cell counts per axis.
    #[inline]
    pub fn dims(&self) -> [i32; D] {
        self.dims
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the lattice has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `c` lies inside the lattice.
    #[inline]
    pub fn contains(&self, c: Coord<D>) -> bool {
        self.len > 0 && c.0.iter().zip(self.dims).all(|(&v, d)| v >= 0 && v < d)
    }

    /// Flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord<D>) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(
            c.0.iter()
                .zip(self.strides)
                .map(|(&v, s)| v as usize * s)
                .sum(),
        )
    }

    /// Coordinate of flat index `idx`. `idx` must be `< len()`.
    #[inline]
    pub fn coord(&self, mut idx: usize) -> Coord<D> {
        debug_assert!(idx < self.len, "lattice index {idx} out of range");
        let mut out = [0i32; D];
        for (o, d) in out.iter_mut().zip(self.dims) {
            let d = d as usize;
            *o = (idx % d) as i32;
            idx /= d;
        }
        Coord(out)
    }

    /// Iterate over every coordinate in index order.
    pub fn coords(&self) -> impl Iterator<Item = Coord<D>> + '_ {
        (0..self.len).map(|i| self.coord(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_contains() {
        let l = Lattice::new([4, 3]);
        assert_eq!(l.len(), 12);
        assert!(l.contains(Coord::xy(3, 2)));
        assert!(!l.contains(Coord::xy(4, 0)));
        assert!(!l.contains(Coord::xy(0, -1)));
    }

    #[test]
    fn index_is_row_major() {
        let l = Lattice::new([4, 3, 2]);
        assert_eq!(l.index(Coord::xyz(0, 0, 0)), Some(0));
        assert_eq!(l.index(Coord::xyz(1, 0, 0)), Some(1));
        assert_eq!(l.index(Coord::xyz(0, 1, 0)), Some(4));
        assert_eq!(l.index(Coord::xyz(0, 0, 1)), Some(12));
        assert_eq!(l.index(Coord::xyz(3, 2, 1)), Some(23));
        assert_eq!(l.index(Coord::xyz(4, 0, 0)), None);
    }

    #[test]
    fn coord_inverts_index() {
        let l = Lattice::new([5, 4, 3]);
        for (i, c) in l.coords().enumerate() {
            assert_eq!(l.index(c), Some(i));
        }
        assert_eq!(l.coord(23), Coord::xyz(3, 0, 1));
    }

    #[test]
    fn coords_follow_coord_order() {
        let l = Lattice::new([3, 3]);
        let all: Vec<_> = l.coords().collect();
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }

    #[test]
    fn degenerate_dims_are_empty() {
        assert!(Lattice::new([0, 5]).is_empty());
        assert!(Lattice::new([3, -1, 2]).is_empty());
        assert!(!Lattice::new([0, 5]).contains(Coord::xy(0, 0)));
        let big = i32::MAX as usize;
        assert_eq!(Lattice::<2>::checked_len([i32::MAX, i32::MAX]), Some(big * big));
        assert_eq!(Lattice::<3>::checked_len([i32::MAX; 3]), None);
    }
}
