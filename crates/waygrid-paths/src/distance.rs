use waygrid_core::Coord;

/// Cost of one step that changes `n` axes at once, indexed by `n - 1`.
///
/// Scaled by 10 so that √2 ≈ 1.4 and √3 ≈ 1.7 stay exact integers.
pub const STEP_COSTS: [i32; 3] = [10, 14, 17];

/// Octile (2D) / 26-direction (3D) distance between two cells.
///
/// Moves as many cells as possible along all axes at once, then along the
/// remaining axes, pricing each leg with [`STEP_COSTS`]. Serves both as the
/// exact edge cost between neighbours and as the A* heuristic.
#[inline]
pub fn octile<const D: usize>(a: Coord<D>, b: Coord<D>) -> i32 {
    const { assert!(D >= 1 && D <= STEP_COSTS.len(), "unsupported dimensionality") };
    let mut deltas = a.abs_delta(b);
    deltas.sort_unstable();
    let mut cost = 0;
    let mut prev = 0;
    for (i, d) in deltas.into_iter().enumerate() {
        cost += STEP_COSTS[D - 1 - i] * (d - prev);
        prev = d;
    }
    cost
}

/// Chebyshev (L∞) distance between two cells.
#[inline]
pub fn chebyshev<const D: usize>(a: Coord<D>, b: Coord<D>) -> i32 {
    a.abs_delta(b).into_iter().max().unwrap_or(0)
}
