//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # Default: 200 runs
//!   cargo run --bin simulate -- -n 50 --seed 42      # Reproducible run
//!   cargo run --bin simulate -- --config balance.toml

use epic_adventure::core::config::BalanceConfig;
use epic_adventure::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, write_json) = parse_args(&args);

    let default_filter = if config.verbosity >= 2 {
        "epic_adventure=debug"
    } else {
        "epic_adventure=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              EPIC ADVENTURE BALANCE SIMULATOR                 ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:             {}", config.num_runs);
    println!("  Max Explorations: {}", config.max_encounters_per_run);
    println!("  Flee Chance:      {:.0}%", config.balance.flee_chance * 100.0);
    if let Some(seed) = config.seed {
        println!("  Seed:             {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => eprintln!("Failed to write JSON report: {}", e),
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, bool) {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(config.num_runs);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-m" | "--max-encounters" => {
                if i + 1 < args.len() {
                    config.max_encounters_per_run =
                        args[i + 1].parse().unwrap_or(config.max_encounters_per_run);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config.balance = BalanceConfig::load_or_default(Path::new(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--json" => {
                write_json = true;
            }
            "--quick" => {
                config = SimConfig::quick(config.seed.unwrap_or(42));
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, write_json)
}

fn print_help() {
    println!("Epic Adventure Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>            Number of simulated sessions (default: 200)");
    println!("    -s, --seed <S>            Random seed for reproducibility");
    println!("    -m, --max-encounters <M>  Explorations per session (default: 2000)");
    println!("    -c, --config <FILE>       Balance TOML file");
    println!("    -v, --verbose             Per-run output and debug logs");
    println!("    --json                    Save JSON report");
    println!("    --quick                   Quick seeded check (20 runs)");
    println!("    -h, --help                Show this help");
}
