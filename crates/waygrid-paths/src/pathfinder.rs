use waygrid_core::{Coord, WorldPoint};

use crate::astar::{SearchEngine, SearchStats};
use crate::config::{GridConfig, SearchConfig};
use crate::error::GridError;
use crate::grid::GridSpace;
use crate::probe::ObstacleProbe;

/// A grid, the probe that fills it and an engine to search it.
///
/// This is the single-owner entry point: build it once from configuration,
/// then call [`find_path`](Self::find_path) as often as needed. Hosts that
/// search one grid from several threads should use [`GridSpace`] and one
/// [`SearchEngine`] per thread instead.
pub struct Pathfinder<const D: usize, P: ObstacleProbe<D>> {
    grid: GridSpace<D>,
    probe: P,
    engine: SearchEngine<D>,
}

impl<const D: usize, P: ObstacleProbe<D>> Pathfinder<D, P> {
    /// Build the grid described by `grid` using `probe`.
    pub fn new(grid: GridConfig<D>, search: SearchConfig, probe: P) -> Result<Self, GridError> {
        let grid = GridSpace::new(grid, &probe)?;
        let engine = SearchEngine::for_grid(&grid, search);
        Ok(Self {
            grid,
            probe,
            engine,
        })
    }

    /// Waypoints from `start` to `goal`; empty if there is no path or the
    /// goal is blocked. See [`SearchEngine::find_path`].
    pub fn find_path(&mut self, start: WorldPoint<D>, goal: WorldPoint<D>) -> Vec<WorldPoint<D>> {
        self.engine.find_path(&self.grid, start, goal)
    }

    /// Unsimplified cell chain between two cells. See
    /// [`SearchEngine::find_cell_path`].
    pub fn find_cell_path(&mut self, start: Coord<D>, goal: Coord<D>) -> Option<Vec<Coord<D>>> {
        self.engine.find_cell_path(&self.grid, start, goal)
    }

    /// Re-probe every cell. Returns the number of walkable cells.
    pub fn refresh_walkability(&mut self) -> usize {
        self.grid.refresh_walkability(&self.probe)
    }

    /// Per-tick hook for the host: refreshes walkability if the grid was
    /// configured with `auto_refresh`. Returns whether it did.
    pub fn update(&mut self) -> bool {
        if !self.grid.config().auto_refresh {
            return false;
        }
        self.refresh_walkability();
        true
    }

    /// Telemetry for the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.engine.last_stats()
    }

    /// The searched grid.
    #[inline]
    pub fn grid(&self) -> &GridSpace<D> {
        &self.grid
    }

    /// Mutable access to the grid, e.g. for [`GridSpace::set_walkable`].
    #[inline]
    pub fn grid_mut(&mut self) -> &mut GridSpace<D> {
        &mut self.grid
    }

    /// The obstacle probe.
    #[inline]
    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Mutable access to the probe. Changes take effect on the next
    /// refresh.
    #[inline]
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// The search engine.
    #[inline]
    pub fn engine_mut(&mut self) -> &mut SearchEngine<D> {
        &mut self.engine
    }

    /// Radius of a cell, for hosts sizing agents or debug markers.
    #[inline]
    pub fn node_radius(&self) -> f32 {
        self.grid.config().node_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astar::SearchOutcome;
    use crate::probe::{OpenWorld, Spheres};
    use crate::simplify::simplify;

    #[test]
    fn finds_path_on_open_3x3() {
        let mut pf = Pathfinder::new(
            GridConfig::new([3.0, 3.0], 0.5),
            SearchConfig::default(),
            OpenWorld,
        )
        .unwrap();
        let path = pf.find_path(WorldPoint::xy(-1.0, -1.0), WorldPoint::xy(1.0, 1.0));
        assert_eq!(path, vec![WorldPoint::xy(1.0, 1.0)]);
        assert_eq!(pf.last_stats().outcome, SearchOutcome::Found);
        assert_eq!(pf.node_radius(), 0.5);
    }

    #[test]
    fn construction_errors_propagate() {
        let err = Pathfinder::new(
            GridConfig::new([3.0, 3.0], -1.0),
            SearchConfig::default(),
            OpenWorld,
        )
        .err();
        assert_eq!(err, Some(GridError::InvalidRadius(-1.0)));
    }

    #[test]
    fn refresh_sees_probe_changes() {
        let mut pf = Pathfinder::new(
            GridConfig::new([5.0, 1.0], 0.5),
            SearchConfig::default(),
            Spheres::new(),
        )
        .unwrap();
        let from = WorldPoint::xy(-2.0, 0.0);
        let to = WorldPoint::xy(2.0, 0.0);
        assert_eq!(pf.find_path(from, to), vec![WorldPoint::xy(2.0, 0.0)]);

        pf.probe_mut().push(WorldPoint::xy(0.0, 0.0), 0.1);
        // Not refreshed yet: the grid still has the old walkability.
        assert!(!pf.find_path(from, to).is_empty());
        assert_eq!(pf.refresh_walkability(), 4);
        assert!(pf.find_path(from, to).is_empty());
        assert_eq!(pf.last_stats().outcome, SearchOutcome::Unreachable);
    }

    #[test]
    fn update_honours_auto_refresh() {
        let manual = GridConfig::new([3.0, 3.0], 0.5);
        let mut pf = Pathfinder::new(manual.clone(), SearchConfig::default(), Spheres::new()).unwrap();
        pf.probe_mut().push(WorldPoint::xy(0.0, 0.0), 0.1);
        assert!(!pf.update());
        assert!(pf.grid().is_walkable(Coord::xy(1, 1)));

        let mut pf = Pathfinder::new(
            manual.with_auto_refresh(true),
            SearchConfig::default(),
            Spheres::new(),
        )
        .unwrap();
        pf.probe_mut().push(WorldPoint::xy(0.0, 0.0), 0.1);
        assert!(pf.update());
        assert!(!pf.grid().is_walkable(Coord::xy(1, 1)));
    }

    #[test]
    fn closure_probe_and_manual_overrides() {
        let mut pf = Pathfinder::new(
            GridConfig::new([6.0, 3.0], 0.5),
            SearchConfig::default(),
            |c: WorldPoint<2>, _r: f32| c[0] > 0.0 && c[0] < 1.0 && c[1] < 1.0,
        )
        .unwrap();
        // Column x = 3 is blocked except its top cell.
        assert_eq!(pf.grid().walkable_count(), 16);
        let from = WorldPoint::xy(-2.5, -1.0);
        let to = WorldPoint::xy(2.5, -1.0);
        let around = pf.find_path(from, to);
        assert_eq!(around.last(), Some(&WorldPoint::xy(2.5, -1.0)));
        assert!(around.iter().any(|p| p[1] > 0.5));

        let chain = pf.find_cell_path(Coord::xy(0, 0), Coord::xy(5, 0)).unwrap();
        assert!(chain.contains(&Coord::xy(3, 2)));
        assert_eq!(chain.len(), 6);

        pf.grid_mut().set_walkable(Coord::xy(3, 2), false);
        assert!(pf.find_path(from, to).is_empty());
        assert_eq!(pf.find_cell_path(Coord::xy(0, 0), Coord::xy(5, 0)), None);
    }

    #[test]
    fn one_cell_search_serves_chain_and_waypoints() {
        let rocks = Spheres::new().with(WorldPoint::xy(0.0, 0.0), 1.5);
        let mut pf = Pathfinder::new(
            GridConfig::new([10.0, 10.0], 0.5),
            SearchConfig::default(),
            rocks,
        )
        .unwrap();
        let (from, to) = (WorldPoint::xy(-4.5, -4.5), WorldPoint::xy(4.5, 4.5));

        let waypoints = pf.find_path(from, to);
        let direct = pf.last_stats();

        let start = pf.grid().locate(from);
        let goal = pf.grid().locate(to);
        let chain = pf.find_cell_path(start, goal).unwrap();
        let stats = pf.last_stats();
        assert_eq!(simplify(pf.grid(), &chain), waypoints);
        assert_eq!(stats.outcome, direct.outcome);
        assert_eq!(stats.expanded, direct.expanded);

        // Same cell: the chain is just the start and there are no waypoints.
        let chain = pf.find_cell_path(start, start).unwrap();
        assert_eq!(chain, vec![start]);
        assert!(simplify(pf.grid(), &chain).is_empty());
        assert!(pf.find_path(from, from).is_empty());
        assert_eq!(pf.last_stats().outcome, SearchOutcome::AlreadyThere);
    }

    #[test]
    fn engine_config_can_change() {
        let mut pf = Pathfinder::new(
            GridConfig::new([30.0, 30.0], 0.5),
            SearchConfig::default(),
            OpenWorld,
        )
        .unwrap();
        pf.engine_mut()
            .set_config(SearchConfig::default().with_max_expansions(3));
        assert!(pf.find_path(WorldPoint::xy(-14.0, 0.0), WorldPoint::xy(14.0, 0.0)).is_empty());
        assert_eq!(pf.last_stats().outcome, SearchOutcome::BudgetExhausted);
    }
}
