//! Simulation configuration.

use crate::core::config::BalanceConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated sessions
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Explorations per session before it times out
    pub max_encounters_per_run: u32,

    /// Seconds of world time each exploration takes
    pub seconds_per_exploration: f64,

    /// Balance numbers the sessions play with
    pub balance: BalanceConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_encounters_per_run: 2_000,
            seconds_per_exploration: 30.0,
            balance: BalanceConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded config for smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 20,
            seed: Some(seed),
            max_encounters_per_run: 300,
            ..Default::default()
        }
    }
}
