//! Tunable balance numbers.
//!
//! Defaults mirror `core::constants`. A TOML file may override any subset:
//!
//! ```toml
//! flee_chance = 0.5
//! defend_damage_factor = 0.4
//! ```

use crate::core::constants::*;
use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Chance that a flee attempt from a regular enemy succeeds.
    pub flee_chance: f64,
    /// Chance that a flee attempt from a boss succeeds (0.0 = never).
    pub boss_flee_chance: f64,
    /// Multiplier applied to the enemy's next hit after the player defends.
    pub defend_damage_factor: f64,
    /// Share of gold lost on defeat.
    pub defeat_gold_penalty: f64,
    pub day_length_seconds: f64,
    pub weather_tick_seconds: f64,
    pub weather_change_chance: f64,
    pub healer_cost_per_level: u32,
    pub sell_price_divisor: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            flee_chance: FLEE_CHANCE,
            boss_flee_chance: BOSS_FLEE_CHANCE,
            defend_damage_factor: DEFEND_DAMAGE_FACTOR,
            defeat_gold_penalty: DEFEAT_GOLD_PENALTY,
            day_length_seconds: DAY_LENGTH_SECONDS,
            weather_tick_seconds: WEATHER_TICK_SECONDS,
            weather_change_chance: WEATHER_CHANGE_CHANCE,
            healer_cost_per_level: HEALER_COST_PER_LEVEL,
            sell_price_divisor: SELL_PRICE_DIVISOR,
        }
    }
}

impl BalanceConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BalanceConfig = toml::from_str(content)?;
        Ok(config.sanitized())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded balance config from {}", path.display());
        Ok(config)
    }

    /// Like `load`, but falls back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    tracing::warn!("Ignoring balance config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Clamps probabilities into [0, 1] and keeps divisors and periods positive.
    fn sanitized(mut self) -> Self {
        self.flee_chance = self.flee_chance.clamp(0.0, 1.0);
        self.boss_flee_chance = self.boss_flee_chance.clamp(0.0, 1.0);
        self.defend_damage_factor = self.defend_damage_factor.clamp(0.0, 1.0);
        self.defeat_gold_penalty = self.defeat_gold_penalty.clamp(0.0, 1.0);
        self.weather_change_chance = self.weather_change_chance.clamp(0.0, 1.0);
        if self.day_length_seconds <= 0.0 {
            self.day_length_seconds = DAY_LENGTH_SECONDS;
        }
        if self.weather_tick_seconds <= 0.0 {
            self.weather_tick_seconds = WEATHER_TICK_SECONDS;
        }
        self.sell_price_divisor = self.sell_price_divisor.max(1);
        self
    }
}
