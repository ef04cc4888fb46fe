// Player starting stats
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_HP: u32 = 100;
pub const STARTING_ATTACK: u32 = 10;
pub const STARTING_DEFENSE: u32 = 5;
pub const STARTING_GOLD: u32 = 50;

// XP and leveling
pub const STARTING_EXP_TO_LEVEL: u64 = 100;
pub const EXP_CURVE_MULTIPLIER: f64 = 1.5;
pub const LEVEL_UP_MAX_HP: u32 = 20;
pub const LEVEL_UP_ATTACK: u32 = 2;
pub const LEVEL_UP_DEFENSE: u32 = 1;
// Reaching this level opens the road to Dragon's Keep
pub const DRAGONS_KEEP_UNLOCK_LEVEL: u32 = 10;

// Combat
pub const FLEE_CHANCE: f64 = 0.7;
pub const BOSS_FLEE_CHANCE: f64 = 0.0;
pub const DEFEND_DAMAGE_FACTOR: f64 = 0.5;
pub const DEFEAT_GOLD_PENALTY: f64 = 0.3;
pub const MIN_DAMAGE: u32 = 1;

// Enemy scaling: enemy level lands in [player_level + MIN, player_level + MAX]
pub const ENEMY_LEVEL_OFFSET_MIN: i32 = -1;
pub const ENEMY_LEVEL_OFFSET_MAX: i32 = 2;

// Reputation
pub const REPUTATION_MIN: i32 = -100;
pub const REPUTATION_MAX: i32 = 100;
pub const QUEST_REPUTATION_REWARD: i32 = 5;

// Weather resistance is a percentage
pub const WEATHER_RESISTANCE_CAP: u32 = 100;

// Day/night cycle (fractions of DAY_LENGTH_SECONDS)
pub const DAY_LENGTH_SECONDS: f64 = 600.0;
pub const DAWN_END: f64 = 0.1;
pub const DAY_END: f64 = 0.4;
pub const DUSK_END: f64 = 0.5;

// Weather
pub const WEATHER_TICK_SECONDS: f64 = 10.0;
pub const WEATHER_CHANGE_CHANCE: f64 = 0.1;
// Cumulative thresholds for Clear / Rain / Snow, remainder is Sandstorm
pub const WEATHER_CLEAR_THRESHOLD: f64 = 0.6;
pub const WEATHER_RAIN_THRESHOLD: f64 = 0.8;
pub const WEATHER_SNOW_THRESHOLD: f64 = 0.95;

// Exploration outcome thresholds
pub const EXPLORE_ENCOUNTER_THRESHOLD: f64 = 0.6;
pub const EXPLORE_TREASURE_THRESHOLD: f64 = 0.8;
pub const BOSS_ENCOUNTER_MIN_LEVEL: u32 = 10;
pub const BOSS_ENCOUNTER_CHANCE: f64 = 0.2;
pub const TREASURE_GOLD_MIN: u32 = 10;
pub const TREASURE_GOLD_MAX: u32 = 50;
pub const TREASURE_ITEM_CHANCE: f64 = 0.5;

// Town services
pub const HEALER_COST_PER_LEVEL: u32 = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Save system
pub const SAVE_VERSION_MAGIC: u64 = 0x4550494352504700; // "EPICRPG\0" in hex
pub const SAVE_FILE_NAME: &str = "save.dat";
