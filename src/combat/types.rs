use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::items::{Item, LootTable};
use crate::world::Weather;

/// Attack and defense multipliers an enemy gets under one weather state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherModifier {
    pub attack: f64,
    pub defense: f64,
}

impl WeatherModifier {
    pub const NEUTRAL: WeatherModifier = WeatherModifier {
        attack: 1.0,
        defense: 1.0,
    };
}

/// Per-weather multiplier table, one row per `Weather` variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherEffects {
    pub clear: WeatherModifier,
    pub rain: WeatherModifier,
    pub snow: WeatherModifier,
    pub sandstorm: WeatherModifier,
}

impl Default for WeatherEffects {
    fn default() -> Self {
        Self {
            clear: WeatherModifier::NEUTRAL,
            rain: WeatherModifier {
                attack: 0.9,
                defense: 1.0,
            },
            snow: WeatherModifier {
                attack: 1.0,
                defense: 1.1,
            },
            sandstorm: WeatherModifier {
                attack: 1.1,
                defense: 0.9,
            },
        }
    }
}

impl WeatherEffects {
    pub fn get(&self, weather: Weather) -> WeatherModifier {
        match weather {
            Weather::Clear => self.clear,
            Weather::Rain => self.rain,
            Weather::Snow => self.snow,
            Weather::Sandstorm => self.sandstorm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub exp_reward: u64,
    pub gold_reward: u32,
    pub loot: LootTable,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub weather_effects: WeatherEffects,
}

impl Enemy {
    pub fn new(
        name: &str,
        level: u32,
        max_hp: u32,
        attack: u32,
        defense: u32,
        exp_reward: u64,
        gold_reward: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            level: level.max(1),
            max_hp,
            hp: max_hp,
            attack,
            defense,
            exp_reward,
            gold_reward,
            loot: LootTable::new(),
            is_boss: false,
            weather_effects: WeatherEffects::default(),
        }
    }

    pub fn with_loot(mut self, item: Item, chance: f64) -> Self {
        self.loot.add(item, chance);
        self
    }

    pub fn as_boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies an incoming hit after weather-scaled defense. Every hit
    /// lands for at least `MIN_DAMAGE`. Returns the damage dealt.
    pub fn take_damage(&mut self, raw: u32, weather: Weather) -> u32 {
        let effective_defense =
            self.defense as f64 * self.weather_effects.get(weather).defense;
        let actual = (raw as f64 - effective_defense).floor().max(MIN_DAMAGE as f64) as u32;
        self.hp = self.hp.saturating_sub(actual);
        actual
    }

    pub fn attack_power(&self, weather: Weather) -> u32 {
        (self.attack as f64 * self.weather_effects.get(weather).attack).floor() as u32
    }

    /// Rolls the loot table once.
    pub fn generate_loot(&self, rng: &mut impl Rng) -> Vec<Item> {
        self.loot.roll(rng)
    }

    /// Returns a fresh copy leveled around the player. Regular enemies land
    /// between one level below and two above the player; bosses keep their
    /// authored stats.
    pub fn scaled_for_player(&self, player_level: u32, rng: &mut impl Rng) -> Enemy {
        let mut scaled = self.clone();
        scaled.hp = scaled.max_hp;
        if self.is_boss {
            return scaled;
        }

        let offset = rng.gen_range(ENEMY_LEVEL_OFFSET_MIN..=ENEMY_LEVEL_OFFSET_MAX);
        let new_level = (player_level as i64 + offset as i64).max(1) as u32;
        let ratio = new_level as f64 / self.level.max(1) as f64;
        let scale = |stat: u32| ((stat as f64 * ratio).floor() as u32).max(1);

        scaled.level = new_level;
        scaled.max_hp = scale(self.max_hp);
        scaled.hp = scaled.max_hp;
        scaled.attack = scale(self.attack);
        scaled.defense = scale(self.defense);
        scaled.exp_reward = ((self.exp_reward as f64 * ratio).floor() as u64).max(1);
        scaled.gold_reward = scale(self.gold_reward);
        scaled
    }
}

/// One line of the on-screen combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub message: String,
    pub is_player_action: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn goblin() -> Enemy {
        Enemy::new("Goblin", 1, 30, 8, 2, 25, 10)
    }

    #[test]
    fn test_take_damage_subtracts_defense() {
        let mut enemy = goblin();
        assert_eq!(enemy.take_damage(11, Weather::Clear), 9);
        assert_eq!(enemy.hp, 21);
    }

    #[test]
    fn test_take_damage_minimum_one() {
        let mut enemy = goblin();
        assert_eq!(enemy.take_damage(0, Weather::Clear), 1);
        assert_eq!(enemy.take_damage(2, Weather::Snow), 1);
        assert_eq!(enemy.hp, 28);
    }

    #[test]
    fn test_take_damage_saturates_at_zero() {
        let mut enemy = goblin();
        enemy.take_damage(500, Weather::Clear);
        assert_eq!(enemy.hp, 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_weather_changes_defense() {
        let mut enemy = Enemy::new("Golem", 3, 100, 10, 5, 1, 1);
        // Snow: 5.5 defense; sandstorm: 4.5 defense.
        assert_eq!(enemy.take_damage(20, Weather::Snow), 14);
        assert_eq!(enemy.take_damage(20, Weather::Sandstorm), 15);
    }

    #[test]
    fn test_attack_power_by_weather() {
        let enemy = Enemy::new("Brute", 3, 100, 20, 0, 1, 1);
        assert_eq!(enemy.attack_power(Weather::Clear), 20);
        assert_eq!(enemy.attack_power(Weather::Rain), 18);
        assert_eq!(enemy.attack_power(Weather::Snow), 20);
        assert_eq!(enemy.attack_power(Weather::Sandstorm), 22);
    }

    #[test]
    fn test_scaled_enemy_level_window() {
        let base = Enemy::new("Orc", 3, 80, 20, 8, 70, 40);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for player_level in 1..=15 {
            let scaled = base.scaled_for_player(player_level, &mut rng);
            let low = player_level.saturating_sub(1).max(1);
            assert!(scaled.level >= low && scaled.level <= player_level + 2);
            assert!(scaled.max_hp >= 1 && scaled.attack >= 1 && scaled.defense >= 1);
            assert_eq!(scaled.hp, scaled.max_hp);
        }
    }

    #[test]
    fn test_scaling_ratio() {
        let base = Enemy::new("Orc", 3, 80, 20, 8, 70, 40);
        // StepRng(0) picks the lowest offset: level 6 - 1 = 5.
        let scaled = base.scaled_for_player(6, &mut StepRng::new(0, 0));
        assert_eq!(scaled.level, 5);
        assert_eq!(scaled.max_hp, 133);
        assert_eq!(scaled.attack, 33);
        assert_eq!(scaled.defense, 13);
        assert_eq!(scaled.exp_reward, 116);
        assert_eq!(scaled.gold_reward, 66);
    }

    #[test]
    fn test_boss_is_not_scaled() {
        let mut dragon = Enemy::new("Ancient Dragon", 10, 300, 40, 20, 500, 200).as_boss();
        dragon.hp = 12;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let scaled = dragon.scaled_for_player(2, &mut rng);
        assert_eq!(scaled.level, 10);
        assert_eq!(scaled.attack, 40);
        assert_eq!(scaled.hp, 300);
    }

    #[test]
    fn test_generate_loot_extremes() {
        let enemy = goblin()
            .with_loot(Item::misc("Certain", 1), 1.0)
            .with_loot(Item::misc("Impossible", 1), 0.0);
        let high = enemy.generate_loot(&mut StepRng::new(u64::MAX, 0));
        let low = enemy.generate_loot(&mut StepRng::new(0, 0));
        assert_eq!(high, vec![Item::misc("Certain", 1)]);
        assert_eq!(low, vec![Item::misc("Certain", 1)]);
    }
}
