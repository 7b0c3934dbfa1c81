//! Shared helpers for the waygrid demos.
//!
//! Demonstrates: building grids from an obstacle probe, world-space path
//! queries, raw cell chains and search telemetry.

use std::thread::ScopedJoinHandle;

use waygrid_paths::{Coord2, GridSpace, ObstacleProbe, SearchStats, WorldPoint2};

/// Initialise `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// One-line summary of a search for the console.
pub fn describe(stats: &SearchStats) -> String {
    format!(
        "{:?}: {} cells expanded in {:.2?}",
        stats.outcome, stats.expanded, stats.elapsed
    )
}

/// Join scoped worker threads in spawn order, re-raising the first panic.
pub fn join_all<T>(handles: Vec<ScopedJoinHandle<'_, T>>) -> Vec<T> {
    handles
        .into_iter()
        .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
        .collect()
}

// ---------------------------------------------------------------------------
// AsciiMap
// ---------------------------------------------------------------------------

/// A 2D map drawn in text: `#` is a wall, anything else is floor. `S` and
/// `G` mark the start and goal.
///
/// The map covers one world unit per character and is centered on the
/// origin. The first text row is the top of the map (largest y).
#[derive(Debug, Clone)]
pub struct AsciiMap {
    rows: Vec<Vec<u8>>,
    width: usize,
}

impl AsciiMap {
    /// Parse a map. Rows shorter than the longest row are padded with
    /// floor; blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut rows: Vec<Vec<u8>> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(|l| l.as_bytes().to_vec())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, b'.');
        }
        Self { rows, width }
    }

    /// Columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// World-space extent, for `GridConfig::new` with a node radius of 0.5.
    pub fn world_size(&self) -> [f32; 2] {
        [self.width as f32, self.height() as f32]
    }

    /// World-space center of the first character equal to `marker`.
    pub fn find(&self, marker: u8) -> Option<WorldPoint2> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|&b| b == marker)
                .map(|c| self.center(c, r))
        })
    }

    /// Grid coordinate of text position (`col`, `row`).
    pub fn coord(&self, col: usize, row: usize) -> Coord2 {
        Coord2::xy(col as i32, (self.height() - 1 - row) as i32)
    }

    fn center(&self, col: usize, row: usize) -> WorldPoint2 {
        WorldPoint2::xy(
            col as f32 + 0.5 - self.width as f32 / 2.0,
            (self.height() - 1 - row) as f32 + 0.5 - self.height() as f32 / 2.0,
        )
    }

    fn at(&self, p: WorldPoint2) -> Option<u8> {
        let col = (p[0] + self.width as f32 / 2.0).floor();
        let up = (p[1] + self.height() as f32 / 2.0).floor();
        if col < 0.0 || up < 0.0 {
            return None;
        }
        let (col, up) = (col as usize, up as usize);
        if col >= self.width || up >= self.height() {
            return None;
        }
        Some(self.rows[self.height() - 1 - up][col])
    }

    /// Draw the map with `chain` overlaid as `*` and `waypoints` as `o`.
    pub fn render(&self, grid: &GridSpace<2>, chain: &[Coord2], waypoints: &[WorldPoint2]) -> String {
        let mut rows = self.rows.clone();
        let mut mark = |c: Coord2, ch: u8| {
            let (col, up) = (c[0] as usize, c[1] as usize);
            if col < self.width && up < self.height() {
                let cell = &mut rows[self.height() - 1 - up][col];
                if *cell != b'S' && *cell != b'G' {
                    *cell = ch;
                }
            }
        };
        for &c in chain {
            mark(c, b'*');
        }
        for &p in waypoints {
            mark(grid.locate(p), b'o');
        }
        let mut out = String::with_capacity(rows.len() * (self.width + 1));
        for row in rows {
            out.push_str(&String::from_utf8_lossy(&row));
            out.push('\n');
        }
        out
    }
}

impl ObstacleProbe<2> for AsciiMap {
    fn is_blocked(&self, center: WorldPoint2, _radius: f32) -> bool {
        self.at(center).is_none_or(|b| b == b'#')
    }
}
