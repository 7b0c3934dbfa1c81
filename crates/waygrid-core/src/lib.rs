//! **waygrid-core** — geometry primitives shared by the *waygrid* crates.
//!
//! This crate provides the dimension-generic building blocks of a uniform
//! lattice: integer cell coordinates, world-space points and the dense
//! row-major indexing that maps one onto the other.

pub mod geom;
pub mod lattice;
#[cfg(feature = "serde")]
pub mod serde_array;

pub use geom::{Coord, Coord2, Coord3, WorldPoint, WorldPoint2, WorldPoint3};
pub use lattice::Lattice;
