//! A* search over a [`GridSpace`].

use std::cmp::Ordering;
use std::time::{Duration, Instant};

use waygrid_core::{Coord, WorldPoint};

use crate::config::SearchConfig;
use crate::distance::octile;
use crate::grid::GridSpace;
use crate::heap::{HeapItem, IndexedHeap};
use crate::simplify::simplify;

/// Sentinel cost for cells not yet reached in the current search.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-search scratch
// ---------------------------------------------------------------------------

/// Scratch record for one cell. Only meaningful when `generation` matches
/// the engine's current search.
#[derive(Clone)]
struct Node {
    g: i32,
    h: i32,
    parent: usize,
    generation: u32,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            parent: NO_PARENT,
            generation: 0,
            closed: false,
        }
    }
}

/// Open-set entry: a cell index with a snapshot of its priority.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenNode {
    idx: usize,
    f: i32,
    h: i32,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: lower f is served first, lower h breaks ties.
        other.f.cmp(&self.f).then(other.h.cmp(&self.h))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl HeapItem for OpenNode {
    #[inline]
    fn key(&self) -> usize {
        self.idx
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// How the last search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOutcome {
    /// No search has run yet.
    #[default]
    Idle,
    /// A path to the goal was found.
    Found,
    /// Start and goal resolve to the same cell.
    AlreadyThere,
    /// The goal cell is blocked or out of bounds.
    GoalUnwalkable,
    /// The open set emptied before reaching the goal.
    Unreachable,
    /// The expansion budget ran out first.
    BudgetExhausted,
}

impl SearchOutcome {
    /// Whether the search produced a path.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Found | Self::AlreadyThere)
    }
}

/// Telemetry for the most recent search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub outcome: SearchOutcome,
    /// Cells popped from the open set.
    pub expanded: usize,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Reusable A* state.
///
/// Owns the open set and a scratch record per cell, sized to the grid on
/// first use and reused by later searches without reallocation. The grid is
/// only borrowed, so several engines may search one shared grid in
/// parallel.
pub struct SearchEngine<const D: usize> {
    config: SearchConfig,
    nodes: Vec<Node>,
    generation: u32,
    open: IndexedHeap<OpenNode>,
    nbuf: Vec<usize>,
    stats: SearchStats,
}

impl<const D: usize> Default for SearchEngine<D> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<const D: usize> SearchEngine<D> {
    /// Create an engine. Storage is allocated on the first search.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            generation: 0,
            open: IndexedHeap::new(0),
            nbuf: Vec::with_capacity(3usize.pow(D as u32)),
            stats: SearchStats::default(),
        }
    }

    /// Create an engine with storage preallocated for `grid`.
    pub fn for_grid(grid: &GridSpace<D>, config: SearchConfig) -> Self {
        let mut engine = Self::new(config);
        engine.reserve(grid.max_size());
        engine
    }

    /// The engine's configuration.
    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Telemetry for the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Shortest path between two world positions, as simplified waypoints.
    ///
    /// Both positions are snapped with [`GridSpace::locate`], so positions
    /// off the grid search to or from the nearest boundary cell. Returns an
    /// empty vector when the goal cell is blocked or unreachable; the start
    /// cell may itself be blocked. When both snap to the same cell the
    /// result is also empty, with [`SearchOutcome::AlreadyThere`] in
    /// [`last_stats`](Self::last_stats).
    pub fn find_path(
        &mut self,
        grid: &GridSpace<D>,
        start: WorldPoint<D>,
        goal: WorldPoint<D>,
    ) -> Vec<WorldPoint<D>> {
        let start = grid.locate(start);
        let goal = grid.locate(goal);
        match self.find_cell_path(grid, start, goal) {
            Some(cells) => simplify(grid, &cells),
            None => Vec::new(),
        }
    }

    /// Shortest cell chain from `start` to `goal`, both included.
    ///
    /// Returns `None` if either cell is out of bounds, the goal is blocked,
    /// no path exists, or the expansion budget runs out; see
    /// [`last_stats`](Self::last_stats) for which.
    pub fn find_cell_path(
        &mut self,
        grid: &GridSpace<D>,
        start: Coord<D>,
        goal: Coord<D>,
    ) -> Option<Vec<Coord<D>>> {
        let started = Instant::now();
        let (start_idx, goal_idx) = match (grid.index(start), grid.index(goal)) {
            (Some(s), Some(g)) => (s, g),
            (_, None) => {
                self.finish(started, start, goal, SearchOutcome::GoalUnwalkable, 0);
                return None;
            }
            (None, Some(_)) => {
                self.finish(started, start, goal, SearchOutcome::Unreachable, 0);
                return None;
            }
        };

        let (outcome, expanded) = self.search(grid, start_idx, goal_idx);
        self.finish(started, start, goal, outcome, expanded);
        if !outcome.is_success() {
            return None;
        }

        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            path.push(grid.cell_at(ci).coord);
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Size scratch storage for `len` cells, reallocating only on change.
    fn reserve(&mut self, len: usize) {
        if self.nodes.len() != len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.open = IndexedHeap::new(len);
            self.generation = 0;
        }
    }

    /// Start a new search generation, lazily invalidating every node.
    fn bump_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could collide, so wipe them once.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    fn search(&mut self, grid: &GridSpace<D>, start: usize, goal: usize) -> (SearchOutcome, usize) {
        if !grid.cell_at(goal).walkable {
            return (SearchOutcome::GoalUnwalkable, 0);
        }

        self.reserve(grid.max_size());
        let cur_gen = self.bump_generation();
        let goal_coord = grid.cell_at(goal).coord;

        let start_h = octile(grid.cell_at(start).coord, goal_coord);
        self.nodes[start] = Node {
            g: 0,
            h: start_h,
            parent: NO_PARENT,
            generation: cur_gen,
            closed: false,
        };
        if start == goal {
            return (SearchOutcome::AlreadyThere, 0);
        }

        self.open.clear();
        self.open.add(OpenNode {
            idx: start,
            f: start_h,
            h: start_h,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0;

        let outcome = loop {
            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    break SearchOutcome::BudgetExhausted;
                }
            }
            let Some(current) = self.open.remove_first() else {
                break SearchOutcome::Unreachable;
            };

            let ci = current.idx;
            self.nodes[ci].closed = true;
            expanded += 1;

            if ci == goal {
                break SearchOutcome::Found;
            }

            let current_g = self.nodes[ci].g;
            let current_coord = grid.cell_at(ci).coord;

            for &ni in grid.neighbor_indices(ci, &mut nbuf) {
                let cell = grid.cell_at(ni);
                if !cell.walkable {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation != cur_gen {
                    *n = Node {
                        generation: cur_gen,
                        ..Node::default()
                    };
                }
                if n.closed {
                    continue;
                }

                let tentative_g = current_g + octile(current_coord, cell.coord);
                let queued = self.open.contains(ni);
                if tentative_g < n.g || !queued {
                    n.g = tentative_g;
                    n.h = octile(cell.coord, goal_coord);
                    n.parent = ci;
                    let entry = OpenNode {
                        idx: ni,
                        f: n.g + n.h,
                        h: n.h,
                    };
                    if queued {
                        self.open.update_item(entry);
                    } else {
                        self.open.add(entry);
                    }
                }
            }
        };

        self.nbuf = nbuf;
        (outcome, expanded)
    }

    fn finish(
        &mut self,
        started: Instant,
        start: Coord<D>,
        goal: Coord<D>,
        outcome: SearchOutcome,
        expanded: usize,
    ) {
        let elapsed = started.elapsed();
        self.stats = SearchStats {
            outcome,
            expanded,
            elapsed,
        };
        if outcome == SearchOutcome::BudgetExhausted {
            log::warn!(
                "search {start} -> {goal} gave up after {expanded} expansions ({elapsed:?})"
            );
            return;
        }
        let level = if self.config.log_timings {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "search {start} -> {goal}: {outcome:?} after {expanded} expansions in {elapsed:?}"
        );
    }
}
