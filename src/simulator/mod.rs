//! Balance simulator for Monte Carlo analysis.
//!
//! Plays many seeded sessions with a fixed policy to answer:
//! - How often the basic strategy wins a fight
//! - How fast characters level and earn gold
//! - How many runs slay the Ancient Dragon, and how long it takes
//!
//! Runs go through `GameState`, `explore` and `auto_battle`, so results
//! follow the same rules as real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
