use waygrid_core::{Coord, Lattice};

/// Neighbour enumeration over the Chebyshev-distance-1 shell of a cell.
///
/// In `D` dimensions a cell has up to `3^D - 1` neighbours: 8 in 2D and 26
/// in 3D. Only in-bounds cells are produced; walkability is not consulted.
#[derive(Debug, Clone)]
pub struct Neighbors<const D: usize> {
    offsets: Vec<Coord<D>>,
}

impl<const D: usize> Default for Neighbors<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> Neighbors<D> {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        let total = 3usize.pow(D as u32);
        let mut offsets = Vec::with_capacity(total - 1);
        for n in 0..total {
            // Axis 0 is the most significant digit, matching nested loops
            // over x, then y, then z.
            let mut rest = n;
            let mut off = [0i32; D];
            for axis in (0..D).rev() {
                off[axis] = (rest % 3) as i32 - 1;
                rest /= 3;
            }
            if off.iter().any(|&v| v != 0) {
                offsets.push(Coord(off));
            }
        }
        Self { offsets }
    }

    /// The relative offsets, in enumeration order.
    #[inline]
    pub fn offsets(&self) -> &[Coord<D>] {
        &self.offsets
    }

    /// Append the flat indices of the in-bounds neighbours of `c` to `buf`.
    pub fn collect(&self, lattice: &Lattice<D>, c: Coord<D>, buf: &mut Vec<usize>) {
        buf.extend(self.offsets.iter().filter_map(|&d| lattice.index(c + d)));
    }
}

/// Precomputed neighbour table for every cell of a lattice.
///
/// Stored compactly: the neighbours of cell `i` are
/// `targets[starts[i]..starts[i + 1]]`. It encodes topology only and never
/// needs rebuilding when walkability changes.
#[derive(Debug, Clone)]
pub struct Adjacency {
    starts: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    /// Build the table by running [`Neighbors::collect`] once per cell.
    pub fn build<const D: usize>(lattice: &Lattice<D>, neighbors: &Neighbors<D>) -> Self {
        let mut starts = Vec::with_capacity(lattice.len() + 1);
        let mut targets = Vec::with_capacity(lattice.len() * neighbors.offsets().len());
        starts.push(0);
        for c in lattice.coords() {
            neighbors.collect(lattice, c, &mut targets);
            starts.push(targets.len());
        }
        targets.shrink_to_fit();
        Self { starts, targets }
    }

    /// Neighbours of the cell at flat index `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> &[usize] {
        &self.targets[self.starts[idx]..self.starts[idx + 1]]
    }

    /// Number of cells covered by the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.starts.len() - 1
    }

    /// Whether the table covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
