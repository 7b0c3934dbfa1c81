//! 3D cave demo: scatters spherical boulders through a volume, then searches
//! the shared grid from several threads at once.
//!
//! Run: cargo run --bin cave3d [SEED]

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use waygrid_demos::{describe, init_logging, join_all};
use waygrid_paths::{
    GridConfig, GridSpace, SearchConfig, SearchEngine, Spheres, WorldPoint3,
};

const SIZE: [f32; 3] = [24.0, 24.0, 12.0];
const BOULDERS: usize = 60;
const AGENTS: usize = 4;

fn main() {
    init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7u64);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut rocks = Spheres::new();
    for _ in 0..BOULDERS {
        let center = WorldPoint3::xyz(
            rng.random_range(-SIZE[0] / 2.0..SIZE[0] / 2.0),
            rng.random_range(-SIZE[1] / 2.0..SIZE[1] / 2.0),
            rng.random_range(-SIZE[2] / 2.0..SIZE[2] / 2.0),
        );
        rocks.push(center, rng.random_range(0.5..2.5));
    }

    let config = GridConfig::new(SIZE, 0.5).with_detection_scale(1.2);
    let grid = match GridSpace::new(config, &rocks) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "seed {seed}: {} of {} cells walkable",
        grid.walkable_count(),
        grid.max_size()
    );

    // Each agent crosses the volume between opposite corners.
    let trips: Vec<(WorldPoint3, WorldPoint3)> = (0..AGENTS)
        .map(|i| {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let from = WorldPoint3::xyz(sx * 11.0, sy * 11.0, -5.0);
            let to = WorldPoint3::xyz(-sx * 11.0, -sy * 11.0, 5.0);
            (from, to)
        })
        .collect();

    let search = SearchConfig::default().with_max_expansions(grid.max_size() / 2);
    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = trips
            .iter()
            .map(|&(from, to)| {
                let grid = &grid;
                let search = search.clone();
                s.spawn(move || {
                    let mut engine = SearchEngine::for_grid(grid, search);
                    let path = engine.find_path(grid, from, to);
                    (from, to, path, engine.last_stats())
                })
            })
            .collect();
        join_all(handles)
    });

    for (i, (from, to, path, stats)) in results.iter().enumerate() {
        println!("agent {i}: {from} -> {to}");
        println!("  {}", describe(stats));
        for p in path {
            println!("  {p}");
        }
    }
}
