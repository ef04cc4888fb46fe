//! Weather, time of day, and the clock that advances them.

use crate::core::config::BalanceConfig;
use crate::core::constants::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snow,
    Sandstorm,
}

impl Weather {
    pub fn name(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rain => "Rain",
            Weather::Snow => "Snow",
            Weather::Sandstorm => "Sandstorm",
        }
    }

    /// Weighted pick from a draw in [0, 1): 60% Clear, 20% Rain,
    /// 15% Snow, 5% Sandstorm.
    pub fn from_roll(roll: f64) -> Self {
        if roll < WEATHER_CLEAR_THRESHOLD {
            Weather::Clear
        } else if roll < WEATHER_RAIN_THRESHOLD {
            Weather::Rain
        } else if roll < WEATHER_SNOW_THRESHOLD {
            Weather::Snow
        } else {
            Weather::Sandstorm
        }
    }

    /// Scales the player's defense. Rain makes fights a little easier,
    /// sandstorms harder.
    pub fn player_defense_multiplier(&self) -> f64 {
        match self {
            Weather::Clear | Weather::Snow => 1.0,
            Weather::Rain => 1.1,
            Weather::Sandstorm => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn name(&self) -> &'static str {
        match self {
            TimeOfDay::Dawn => "Dawn",
            TimeOfDay::Day => "Day",
            TimeOfDay::Dusk => "Dusk",
            TimeOfDay::Night => "Night",
        }
    }

    /// Maps a position within the day (0.0..1.0) to its segment.
    pub fn from_day_fraction(fraction: f64) -> Self {
        if fraction < DAWN_END {
            TimeOfDay::Dawn
        } else if fraction < DAY_END {
            TimeOfDay::Day
        } else if fraction < DUSK_END {
            TimeOfDay::Dusk
        } else {
            TimeOfDay::Night
        }
    }
}

/// Play time, time of day, and weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldClock {
    pub play_time_seconds: f64,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    pub day_count: u32,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldClock {
    pub fn new() -> Self {
        Self {
            play_time_seconds: 0.0,
            weather: Weather::Clear,
            time_of_day: TimeOfDay::Day,
            day_count: 1,
        }
    }

    /// Advances play time and returns the new weather if it changed.
    ///
    /// Every weather tick boundary crossed gets one transition roll; a
    /// successful roll picks the next weather from the weighted table.
    pub fn advance(
        &mut self,
        delta_seconds: f64,
        config: &BalanceConfig,
        rng: &mut impl Rng,
    ) -> Option<Weather> {
        if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return None;
        }

        let before = self.play_time_seconds;
        self.play_time_seconds += delta_seconds;
        self.refresh_time_of_day(config);

        let tick = config.weather_tick_seconds;
        let ticks_crossed = (self.play_time_seconds / tick).floor() - (before / tick).floor();
        let previous = self.weather;
        for _ in 0..(ticks_crossed.max(0.0) as u64) {
            if rng.gen::<f64>() < config.weather_change_chance {
                self.weather = Weather::from_roll(rng.gen::<f64>());
            }
        }

        if self.weather != previous {
            tracing::debug!("Weather changed from {} to {}", previous.name(), self.weather.name());
            Some(self.weather)
        } else {
            None
        }
    }

    /// Recomputes time of day and day count from play time.
    pub fn refresh_time_of_day(&mut self, config: &BalanceConfig) {
        let day_length = config.day_length_seconds;
        let fraction = (self.play_time_seconds % day_length) / day_length;
        self.time_of_day = TimeOfDay::from_day_fraction(fraction);
        self.day_count = (self.play_time_seconds / day_length).floor() as u32 + 1;
    }
}
