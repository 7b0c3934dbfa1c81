//! Text maze demo: finds a path from `S` to `G` and prints it over the map.
//!
//! Run: cargo run --bin maze2d [MAP_FILE]

use waygrid_demos::{AsciiMap, describe, init_logging};
use waygrid_paths::{GridConfig, Pathfinder, SearchConfig, simplify};

const MAZE: &str = "\
##########################
#S.....#.........#.......#
#.####.#.#######.#.#####.#
#.#....#.#.....#...#...#.#
#.#.####.#.###.#####.#.#.#
#.#......#...#.......#...#
#.##########.#########..##
#............#.........#G#
##########################
";

fn main() {
    init_logging();

    let text = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error: cannot read {path}: {e}");
                std::process::exit(1);
            }
        },
        None => MAZE.to_string(),
    };
    let map = AsciiMap::parse(&text);
    let (Some(start), Some(goal)) = (map.find(b'S'), map.find(b'G')) else {
        eprintln!("Error: map needs an S and a G");
        std::process::exit(1);
    };

    let config = GridConfig::new(map.world_size(), 0.5);
    let search = SearchConfig::default().with_log_timings(true);
    let mut pf = match Pathfinder::new(config, search, map) {
        Ok(pf) => pf,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "{}x{} maze, {} walkable cells",
        pf.probe().width(),
        pf.probe().height(),
        pf.grid().walkable_count()
    );

    let from = pf.grid().locate(start);
    let to = pf.grid().locate(goal);
    let chain = pf.find_cell_path(from, to);
    println!("{}", describe(&pf.last_stats()));
    let Some(chain) = chain else {
        println!("no path from {start} to {goal}");
        return;
    };
    let waypoints = simplify(pf.grid(), &chain);
    println!("{}", pf.probe().render(pf.grid(), &chain, &waypoints));
    for (i, p) in waypoints.iter().enumerate() {
        println!("{i:>3}: {p}");
    }

    // Close the cell after the first turn and search again.
    if let Some(&first) = waypoints.first() {
        let cell = pf.grid().locate(first);
        pf.grid_mut().set_walkable(cell, false);
        let detour = pf.find_path(start, goal);
        println!(
            "with {cell} closed: {} ({} waypoints)",
            describe(&pf.last_stats()),
            detour.len()
        );
    }
}
