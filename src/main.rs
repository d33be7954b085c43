//! Life Grid CLI - Run a headless session from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use life_grid::{compute::Session, schema::SessionConfig};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [generations] [stats.json]", args[0]);
        eprintln!();
        eprintln!("Run a Game of Life session from JSON configuration and save the result.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to session configuration file");
        eprintln!("  generations  Number of generations to run (default: 100)");
        eprintln!("  stats.json   Write final session statistics as JSON");
        eprintln!();
        eprintln!("Example configuration is printed with --example.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let generations: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(100);
    let stats_path = args.get(3).map(PathBuf::from);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: SessionConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let mut session = Session::new(&config).unwrap_or_else(|e| {
        eprintln!("Error creating session: {}", e);
        std::process::exit(1);
    });

    println!("Game of Life");
    println!("============");
    println!(
        "Grid: {}x{} cells, window {}x{}px",
        config.cells.width, config.cells.height, config.window.width, config.window.height
    );
    println!("Generations: {}", generations);
    println!("Initial population: {}", session.grid().population());
    println!();

    let start = Instant::now();
    for i in 0..generations {
        session.step();

        // Print progress every 10%
        if (i + 1) % (generations / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Generation {}/{}: population={}, {:.1} gen/s",
                i + 1,
                generations,
                session.grid().population(),
                (i + 1) as f32 / elapsed
            );
        }
    }
    let elapsed = start.elapsed();

    let stats = session.stats();
    println!();
    println!("{}", stats);
    println!(
        "Time: {:.2}s ({:.1} gen/s)",
        elapsed.as_secs_f32(),
        generations as f32 / elapsed.as_secs_f32()
    );

    if let Err(e) = session.save() {
        eprintln!("Error saving grid: {}", e);
        std::process::exit(1);
    }
    println!("Saved to {}", session.save_path().display());

    if let Some(path) = stats_path {
        let written = serde_json::to_string_pretty(&stats)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(&path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            eprintln!("Error writing stats: {}", e);
            std::process::exit(1);
        }
        println!("Stats written to {}", path.display());
    }
}

fn print_example_config() {
    let config = SessionConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
