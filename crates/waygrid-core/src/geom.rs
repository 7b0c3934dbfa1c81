//! Geometry primitives: [`Coord`] and [`WorldPoint`].
//!
//! Both are generic over the lattice dimensionality `D`. The engine only
//! instantiates `D = 2` and `D = 3`, for which short aliases are provided.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Index, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// An integer cell coordinate on a `D`-dimensional lattice.
///
/// Axis 0 is `x`, axis 1 is `y`, axis 2 (if any) is `z`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord<const D: usize>(
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_array"))] pub [i32; D],
);

/// A 2D cell coordinate.
pub type Coord2 = Coord<2>;
/// A 3D cell coordinate.
pub type Coord3 = Coord<3>;

impl<const D: usize> Coord<D> {
    /// Origin (all axes zero).
    pub const ZERO: Self = Self([0; D]);

    /// Create a coordinate from its per-axis components.
    #[inline]
    pub const fn new(axes: [i32; D]) -> Self {
        Self(axes)
    }

    /// Component along `axis`.
    #[inline]
    pub const fn axis(self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// Per-axis absolute difference between `self` and `other`.
    #[inline]
    pub fn abs_delta(self, other: Self) -> [i32; D] {
        let mut out = [0; D];
        for (o, (a, b)) in out.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *o = (a - b).abs();
        }
        out
    }
}

impl Coord<2> {
    /// Create a 2D coordinate.
    #[inline]
    pub const fn xy(x: i32, y: i32) -> Self {
        Self([x, y])
    }
}

impl Coord<3> {
    /// Create a 3D coordinate.
    #[inline]
    pub const fn xyz(x: i32, y: i32, z: i32) -> Self {
        Self([x, y, z])
    }
}

// --- trait impls for Coord ---

impl<const D: usize> Default for Coord<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[i32; D]> for Coord<D> {
    fn from(axes: [i32; D]) -> Self {
        Self(axes)
    }
}

impl<const D: usize> Index<usize> for Coord<D> {
    type Output = i32;
    #[inline]
    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl<const D: usize> PartialOrd for Coord<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const D: usize> Ord for Coord<D> {
    /// Row-major order: the last axis is the most significant, so sorting
    /// coordinates matches sorting their lattice indices.
    fn cmp(&self, other: &Self) -> Ordering {
        for axis in (0..D).rev() {
            match self.0[axis].cmp(&other.0[axis]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl<const D: usize> fmt::Display for Coord<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str(")")
    }
}

impl<const D: usize> Add for Coord<D> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
        self
    }
}

impl<const D: usize> Sub for Coord<D> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// WorldPoint
// ---------------------------------------------------------------------------

/// A position in continuous world space with `D` axes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint<const D: usize>(
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_array"))] pub [f32; D],
);

/// A 2D world position.
pub type WorldPoint2 = WorldPoint<2>;
/// A 3D world position.
pub type WorldPoint3 = WorldPoint<3>;

impl<const D: usize> WorldPoint<D> {
    /// The world origin.
    pub const ORIGIN: Self = Self([0.0; D]);

    /// Create a point from its per-axis components.
    #[inline]
    pub const fn new(axes: [f32; D]) -> Self {
        Self(axes)
    }

    /// Component along `axis`.
    #[inline]
    pub const fn axis(self, axis: usize) -> f32 {
        self.0[axis]
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f32>()
            .sqrt()
    }
}

impl WorldPoint<2> {
    /// Create a 2D world point.
    #[inline]
    pub const fn xy(x: f32, y: f32) -> Self {
        Self([x, y])
    }
}

impl WorldPoint<3> {
    /// Create a 3D world point.
    #[inline]
    pub const fn xyz(x: f32, y: f32, z: f32) -> Self {
        Self([x, y, z])
    }
}

impl<const D: usize> Default for WorldPoint<D> {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl<const D: usize> From<[f32; D]> for WorldPoint<D> {
    fn from(axes: [f32; D]) -> Self {
        Self(axes)
    }
}

impl<const D: usize> Index<usize> for WorldPoint<D> {
    type Output = f32;
    #[inline]
    fn index(&self, axis: usize) -> &f32 {
        &self.0[axis]
    }
}

impl<const D: usize> fmt::Display for WorldPoint<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:.3}")?;
        }
        f.write_str(")")
    }
}

impl<const D: usize> Add for WorldPoint<D> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
        self
    }
}

impl<const D: usize> Sub for WorldPoint<D> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        self
    }
}
