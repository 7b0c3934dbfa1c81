//! A* pathfinding over uniform 2D and 3D walkability grids.
//!
//! A [`GridSpace`] covers an axis-aligned box of world space with cubic
//! cells (squares in 2D). Each cell is marked walkable or blocked by asking
//! an [`ObstacleProbe`] about its center. A [`SearchEngine`] then finds
//! shortest 8- or 26-connected paths between world positions and reduces
//! them to the cells where the direction of travel changes.
//!
//! Engines keep their scratch state to themselves, so one grid can be
//! searched by many engines at once. [`Pathfinder`] bundles a grid, its
//! probe and an engine for the common single-owner case.
//!
//! # Costs
//!
//! Step costs are integers scaled by ten:
//!
//! | Step | Cost |
//! |---|---|
//! | axis-aligned | 10 |
//! | face diagonal | 14 |
//! | cube diagonal (3D) | 17 |
//!
//! [`octile`] is the matching admissible heuristic, so paths are optimal
//! under these costs.

mod astar;
mod config;
mod distance;
mod error;
mod grid;
mod heap;
mod neighbors;
mod pathfinder;
mod probe;
mod simplify;

pub use astar::{SearchEngine, SearchOutcome, SearchStats, UNREACHABLE};
pub use config::{DETECTION_SCALE_RANGE, GridConfig, SearchConfig};
pub use distance::{STEP_COSTS, chebyshev, octile};
pub use error::GridError;
pub use grid::{Cell, GridSpace};
pub use heap::{HeapItem, IndexedHeap};
pub use neighbors::{Adjacency, Neighbors};
pub use pathfinder::Pathfinder;
pub use probe::{ObstacleProbe, OpenWorld, Spheres};
pub use simplify::{simplify, turning_points};
pub use waygrid_core::{Coord, Coord2, Coord3, Lattice, WorldPoint, WorldPoint2, WorldPoint3};
