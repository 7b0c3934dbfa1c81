use waygrid_core::{Coord, WorldPoint};

use crate::grid::GridSpace;

/// Cells of `chain` where the direction of travel changes, plus the last
/// cell.
///
/// `chain` runs from start to goal. The start cell is never included: a
/// cell is kept when the step arriving at it differs from the step leaving
/// it, and the goal has no step leaving it. Directions are integer grid
/// deltas, so straight runs collapse exactly.
pub fn turning_points<const D: usize>(chain: &[Coord<D>]) -> Vec<Coord<D>> {
    let mut out = Vec::new();
    for k in 1..chain.len() {
        let incoming = chain[k] - chain[k - 1];
        let outgoing = chain.get(k + 1).map_or(Coord::ZERO, |&next| next - chain[k]);
        if incoming != outgoing {
            out.push(chain[k]);
        }
    }
    out
}

/// World-space waypoints for `chain`: the centers of its
/// [`turning_points`].
pub fn simplify<const D: usize>(grid: &GridSpace<D>, chain: &[Coord<D>]) -> Vec<WorldPoint<D>> {
    turning_points(chain)
        .into_iter()
        .map(|c| grid.center_of(c))
        .collect()
}
