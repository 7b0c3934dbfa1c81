//! The uniform lattice searched by the engine.

use waygrid_core::{Coord, Lattice, WorldPoint};

use crate::config::GridConfig;
use crate::error::GridError;
use crate::neighbors::{Adjacency, Neighbors};
use crate::probe::ObstacleProbe;

/// A single lattice cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell<const D: usize> {
    pub coord: Coord<D>,
    /// World-space center of the cell.
    pub center: WorldPoint<D>,
    pub walkable: bool,
}

/// A 2D or 3D grid of cells covering an axis-aligned box of world space.
///
/// Geometry is fixed at construction; only walkability changes afterwards,
/// through [`refresh_walkability`](Self::refresh_walkability) or
/// [`set_walkable`](Self::set_walkable). The grid holds no per-search state,
/// so a shared `&GridSpace` can serve several
/// [`SearchEngine`](crate::SearchEngine)s at once.
#[derive(Debug, Clone)]
pub struct GridSpace<const D: usize> {
    config: GridConfig<D>,
    lattice: Lattice<D>,
    min_corner: WorldPoint<D>,
    cells: Vec<Cell<D>>,
    neighbors: Neighbors<D>,
    adjacency: Option<Adjacency>,
}

impl<const D: usize> GridSpace<D> {
    /// Build a grid from `config`, probing every cell center for obstacles.
    pub fn new<P>(config: GridConfig<D>, probe: &P) -> Result<Self, GridError>
    where
        P: ObstacleProbe<D> + ?Sized,
    {
        const { assert!(D == 2 || D == 3, "grids must be 2D or 3D") };

        let dims = config.cell_counts()?;
        let lattice = Lattice::new(dims);

        let mut min_corner = config.center;
        for (m, size) in min_corner.0.iter_mut().zip(config.world_size) {
            *m -= size / 2.0;
        }

        let radius = config.detection_radius();
        let mut grid = Self {
            lattice,
            min_corner,
            cells: Vec::with_capacity(lattice.len()),
            neighbors: Neighbors::new(),
            adjacency: None,
            config,
        };
        for coord in lattice.coords() {
            let center = grid.center_of(coord);
            let walkable = !probe.is_blocked(center, radius);
            grid.cells.push(Cell {
                coord,
                center,
                walkable,
            });
        }

        if grid.config.precompute_neighbors {
            grid.precompute_neighbors();
        }

        log::debug!(
            "built {:?} grid: {} cells, {} walkable, adjacency {}",
            dims,
            grid.cells.len(),
            grid.walkable_count(),
            if grid.adjacency.is_some() { "precomputed" } else { "realtime" }
        );
        Ok(grid)
    }

    /// Re-run `probe` over every cell, updating walkability in place.
    ///
    /// Geometry and the neighbour table are untouched. Returns the number
    /// of walkable cells afterwards.
    pub fn refresh_walkability<P>(&mut self, probe: &P) -> usize
    where
        P: ObstacleProbe<D> + ?Sized,
    {
        let radius = self.config.detection_radius();
        let mut walkable = 0;
        for cell in self.cells.iter_mut() {
            cell.walkable = !probe.is_blocked(cell.center, radius);
            walkable += usize::from(cell.walkable);
        }
        log::debug!("refreshed walkability: {walkable}/{} cells walkable", self.cells.len());
        walkable
    }

    /// Build the neighbour table if it does not exist yet.
    pub fn precompute_neighbors(&mut self) {
        if self.adjacency.is_none() {
            self.adjacency = Some(Adjacency::build(&self.lattice, &self.neighbors));
        }
    }

    /// Drop the neighbour table and enumerate neighbours on demand.
    pub fn discard_neighbors(&mut self) {
        self.adjacency = None;
    }

    /// Whether neighbours come from a precomputed table.
    #[inline]
    pub fn has_precomputed_neighbors(&self) -> bool {
        self.adjacency.is_some()
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// The configuration the grid was built from.
    #[inline]
    pub fn config(&self) -> &GridConfig<D> {
        &self.config
    }

    /// Cell counts per axis.
    #[inline]
    pub fn dims(&self) -> [i32; D] {
        self.lattice.dims()
    }

    /// Index layout of the cells.
    #[inline]
    pub fn lattice(&self) -> &Lattice<D> {
        &self.lattice
    }

    /// Total cell count; the capacity a search's open set needs.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.lattice.len()
    }

    /// The grid's minimum world-space corner.
    #[inline]
    pub fn min_corner(&self) -> WorldPoint<D> {
        self.min_corner
    }

    /// Nearest cell to `p`.
    ///
    /// Positions outside the grid clamp to the nearest boundary cell; this
    /// never fails.
    pub fn locate(&self, p: WorldPoint<D>) -> Coord<D> {
        let dims = self.lattice.dims();
        let mut out = [0i32; D];
        for axis in 0..D {
            let pct = ((p[axis] - self.config.center[axis]) / self.config.world_size[axis] + 0.5)
                .clamp(0.0, 1.0);
            out[axis] = ((dims[axis] - 1) as f32 * pct).round_ties_even() as i32;
        }
        Coord(out)
    }

    /// World-space center of `c`, whether or not it is in bounds.
    pub fn center_of(&self, c: Coord<D>) -> WorldPoint<D> {
        let diameter = self.config.node_diameter();
        let mut out = self.min_corner;
        for (o, v) in out.0.iter_mut().zip(c.0) {
            *o += v as f32 * diameter + self.config.node_radius;
        }
        out
    }

    // -----------------------------------------------------------------------
    // Cells
    // -----------------------------------------------------------------------

    /// Flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, c: Coord<D>) -> Option<usize> {
        self.lattice.index(c)
    }

    /// The cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, c: Coord<D>) -> Option<&Cell<D>> {
        self.index(c).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> &Cell<D> {
        &self.cells[idx]
    }

    /// All cells in index order.
    #[inline]
    pub fn cells(&self) -> &[Cell<D>] {
        &self.cells
    }

    /// Whether `c` is in bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, c: Coord<D>) -> bool {
        self.cell(c).is_some_and(|cell| cell.walkable)
    }

    /// Override the walkability of `c`. Returns `false` if `c` is out of
    /// bounds.
    pub fn set_walkable(&mut self, c: Coord<D>, walkable: bool) -> bool {
        match self.index(c) {
            Some(i) => {
                self.cells[i].walkable = walkable;
                true
            }
            None => false,
        }
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    // -----------------------------------------------------------------------
    // Neighbours
    // -----------------------------------------------------------------------

    /// In-bounds neighbours of `c`, from the table if there is one.
    ///
    /// Returns an empty list for out-of-bounds `c`.
    pub fn neighbors(&self, c: Coord<D>) -> Vec<Coord<D>> {
        let Some(idx) = self.index(c) else {
            return Vec::new();
        };
        let mut buf = Vec::new();
        self.neighbor_indices(idx, &mut buf)
            .iter()
            .map(|&i| self.cells[i].coord)
            .collect()
    }

    /// In-bounds neighbours of `c`, always enumerated on demand.
    pub fn neighbors_realtime(&self, c: Coord<D>) -> Vec<Coord<D>> {
        let mut buf = Vec::new();
        if self.lattice.contains(c) {
            self.neighbors.collect(&self.lattice, c, &mut buf);
        }
        buf.into_iter().map(|i| self.cells[i].coord).collect()
    }

    /// In-bounds neighbours of `c` from the precomputed table, or `None` if
    /// there is no table or `c` is out of bounds.
    pub fn neighbors_precomputed(&self, c: Coord<D>) -> Option<Vec<Coord<D>>> {
        let adjacency = self.adjacency.as_ref()?;
        let idx = self.index(c)?;
        Some(adjacency.get(idx).iter().map(|&i| self.cells[i].coord).collect())
    }

    /// Neighbour indices of the cell at `idx`: a slice of the table when
    /// there is one, otherwise `buf` refilled on demand.
    #[inline]
    pub(crate) fn neighbor_indices<'a>(&'a self, idx: usize, buf: &'a mut Vec<usize>) -> &'a [usize] {
        match &self.adjacency {
            Some(adjacency) => adjacency.get(idx),
            None => {
                buf.clear();
                self.neighbors.collect(&self.lattice, self.cells[idx].coord, buf);
                buf
            }
        }
    }
}
