use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tilenav::config::{NavigationConfig, StepBudget, load_config};
use tilenav::errors::NavResult;
use tilenav::{MapDefinition, NavigationEngine, PermissionSet};

#[path = "tilenav/cli_utils.rs"]
mod cli_utils;

use cli_utils::*;

#[derive(Parser)]
#[command(name = "tilenav")]
#[command(about = "Query tile navigation maps: routes, spawn points and walkability stats")]
struct Args {
    /// Override the configured search step budget
    #[arg(long, global = true)]
    step_budget: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute a route between two positions
    Path {
        /// Map file: a .toml path, or a binary map name inside maps/
        #[arg(long)]
        map: String,

        /// Start position (format: X,Y)
        #[arg(long)]
        from: String,

        /// Goal position (format: X,Y)
        #[arg(long)]
        to: String,

        /// Accept arrival near the goal instead of exactly on it
        #[arg(long)]
        fuzzy: bool,

        /// Lock token the traveller may pass through (repeatable)
        #[arg(long = "permit")]
        permits: Vec<String>,

        /// Extra lock placed before searching (format: X,Y,TOKEN, repeatable)
        #[arg(long = "block")]
        blocks: Vec<String>,
    },

    /// Sample random walkable spawn cells
    Spawn {
        /// Map file: a .toml path, or a binary map name inside maps/
        #[arg(long)]
        map: String,

        /// Random seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Number of cells to sample
        #[arg(long, default_value = "1")]
        count: u32,
    },

    /// Print map dimensions and walkability statistics
    Info {
        /// Map file: a .toml path, or a binary map name inside maps/
        #[arg(long)]
        map: String,
    },

    /// Convert a TOML map into the binary format under maps/
    Convert {
        /// Source TOML map
        #[arg(long)]
        map: String,

        /// Output file path relative to maps/ (e.g. "town.bin")
        #[arg(long)]
        output: String,
    },
}

fn navigation_config(args: &Args) -> NavigationConfig {
    let mut config = load_config();
    if let Some(budget) = args.step_budget {
        config.step_budget = StepBudget::new(budget);
    }
    config
}

fn main() -> NavResult<()> {
    let args = Args::parse();
    let config = navigation_config(&args);

    match &args.command {
        Command::Path {
            map,
            from,
            to,
            fuzzy,
            permits,
            blocks,
        } => {
            let map = load_map(map)?;
            let start = parse_position(from)?;
            let goal = parse_position(to)?;

            let mut engine = NavigationEngine::from_map(&map, config);
            for block in blocks {
                let item = parse_blocking_item(block)?;
                engine.set_blocking_item(item.x, item.y, item.token);
            }

            let permissions: PermissionSet = permits.iter().map(String::as_str).collect();
            let path = engine.generate_path(&permissions, start, goal, *fuzzy);

            if path.is_empty() {
                println!("No movement: already at the goal or no route found");
            } else {
                println!("Route with {} waypoints:", path.len());
                for (i, waypoint) in path.iter().enumerate() {
                    println!("  {}: ({}, {})", i, waypoint.x, waypoint.y);
                }
            }
        }
        Command::Spawn { map, seed, count } => {
            let map = load_map(map)?;
            let engine = NavigationEngine::from_map(&map, config);
            engine.ensure_spawnable()?;

            let mut rng = match seed {
                Some(seed) => Pcg64::seed_from_u64(*seed),
                None => Pcg64::from_entropy(),
            };
            for _ in 0..*count {
                let cell = engine.spawn_coordinate_with(&mut rng);
                println!("({}, {})", cell.x, cell.y);
            }
        }
        Command::Info { map } => {
            let map = load_map(map)?;
            let engine = NavigationEngine::from_map(&map, config);
            let total_cells = map.width as usize * map.height as usize;
            let walkable = engine.grid().walkable_count();

            println!("Map summary:");
            println!("  Name: {}", map.name);
            println!("  Size: {}x{}", map.width, map.height);
            println!("  Terrain kinds: {}", map.catalog.len());
            for kind in &map.catalog {
                let walkability = if kind.walkable { "walkable" } else { "blocked" };
                println!("    {} ({}): {}", kind.name, kind.id, walkability);
            }
            println!(
                "  Walkable cells: {}/{} ({:.1}%)",
                walkable,
                total_cells,
                (walkable as f32 / total_cells.max(1) as f32) * 100.0
            );
            println!("  Locked cells: {}", engine.blocking_item_count());
        }
        Command::Convert { map, output } => {
            let map = MapDefinition::load_toml(map)?;
            map.save_to_file(output)?;
            println!(
                "Map '{}' saved to {}",
                map.name,
                MapDefinition::get_maps_dir()?.join(output).display()
            );
        }
    }

    Ok(())
}
