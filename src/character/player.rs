//! The player character: stats, leveling, inventory, equipment, quests,
//! skills, location, and the world clock the character lives under.

use super::inventory::Inventory;
use super::skills::{SkillStat, SkillTree};
use crate::core::config::BalanceConfig;
use crate::core::constants::*;
use crate::items::catalog::small_health_potion;
use crate::items::{Equipment, EquipmentSlot, Item};
use crate::progression::quests::{Quest, QuestLog, QuestReward};
use crate::world::{Location, Weather, WorldClock};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub(crate) level: u32,
    pub(crate) exp: u64,
    pub(crate) exp_to_level: u64,
    pub hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) base_attack: u32,
    pub(crate) base_defense: u32,
    pub gold: u32,
    pub(crate) inventory: Inventory,
    pub(crate) equipment: Equipment,
    pub(crate) location: Location,
    pub(crate) unlocked: BTreeSet<Location>,
    pub(crate) quests: QuestLog,
    pub(crate) skills: SkillTree,
    pub(crate) reputation: i32,
    pub clock: WorldClock,
}

impl Player {
    /// A fresh level-1 character with a wooden sword and leather vest
    /// equipped and one small potion.
    pub fn new(name: &str) -> Self {
        let mut player = Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            level: STARTING_LEVEL,
            exp: 0,
            exp_to_level: STARTING_EXP_TO_LEVEL,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            base_attack: STARTING_ATTACK,
            base_defense: STARTING_DEFENSE,
            gold: STARTING_GOLD,
            inventory: Inventory::new(),
            equipment: Equipment::new(),
            location: Location::START,
            unlocked: [Location::StartingForest, Location::GreenfieldTown]
                .into_iter()
                .collect(),
            quests: QuestLog::new(),
            skills: SkillTree::starting(),
            reputation: 0,
            clock: WorldClock::new(),
        };

        let sword = Item::weapon("Wooden Sword", 2, 5)
            .with_description("A basic wooden training sword");
        let vest = Item::armor("Leather Vest", 3, 20)
            .with_description("Simple leather armor offering minimal protection");
        player.add_item(sword.clone());
        player.add_item(vest.clone());
        player.add_item(small_health_potion());
        player.equip_item(&sword);
        player.equip_item(&vest);
        player
    }

    // ── Stats ───────────────────────────────────────────────────────

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn exp(&self) -> u64 {
        self.exp
    }

    pub fn exp_to_level(&self) -> u64 {
        self.exp_to_level
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn base_attack(&self) -> u32 {
        self.base_attack
    }

    pub fn base_defense(&self) -> u32 {
        self.base_defense
    }

    /// Base attack plus skill and weapon bonuses.
    pub fn attack(&self) -> u32 {
        self.base_attack + self.skills.bonus(SkillStat::Attack) + self.equipment.attack_bonus()
    }

    /// Base defense plus skill and armor bonuses.
    pub fn defense(&self) -> u32 {
        self.base_defense
            + self.skills.bonus(SkillStat::Defense)
            + self.equipment.defense_bonus()
    }

    /// Percentage of weather influence shrugged off, 0..=100.
    pub fn weather_resistance(&self) -> u32 {
        self.skills
            .bonus(SkillStat::WeatherResistance)
            .min(WEATHER_RESISTANCE_CAP)
    }

    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    pub fn adjust_reputation(&mut self, delta: i32) {
        self.reputation = (self.reputation + delta).clamp(REPUTATION_MIN, REPUTATION_MAX);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    // ── Leveling ────────────────────────────────────────────────────

    /// Adds experience and processes every level-up it pays for.
    /// Returns the number of levels gained.
    pub fn add_exp(&mut self, amount: u64) -> u32 {
        self.exp = self.exp.saturating_add(amount);
        let mut gained = 0;
        while self.exp >= self.exp_to_level {
            self.level_up();
            gained += 1;
        }
        if gained > 0 && self.level >= DRAGONS_KEEP_UNLOCK_LEVEL {
            self.unlock_location(Location::DragonsKeep);
        }
        gained
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        self.exp = self.exp.saturating_sub(self.exp_to_level);
        self.exp_to_level = ((self.exp_to_level as f64 * EXP_CURVE_MULTIPLIER) as u64).max(1);
        self.max_hp += LEVEL_UP_MAX_HP;
        self.hp = self.max_hp;
        self.base_attack += LEVEL_UP_ATTACK;
        self.base_defense += LEVEL_UP_DEFENSE;
        tracing::info!("{} reached level {}", self.name, self.level);
    }

    // ── Health ──────────────────────────────────────────────────────

    /// Defense multiplier for the current weather, pulled toward 1.0 by
    /// weather resistance.
    pub fn weather_defense_multiplier(&self) -> f64 {
        let raw = self.clock.weather.player_defense_multiplier();
        let resistance = self.weather_resistance() as f64 / 100.0;
        raw + (1.0 - raw) * resistance
    }

    /// Applies a hit after weather-scaled defense. Every hit lands for at
    /// least `MIN_DAMAGE`. Returns the damage dealt.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let effective_defense = self.defense() as f64 * self.weather_defense_multiplier();
        let actual = (raw as f64 - effective_defense)
            .floor()
            .max(MIN_DAMAGE as f64) as u32;
        self.hp = self.hp.saturating_sub(actual);
        actual
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn heal_to_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Wakes up in town at half health, minus a share of gold.
    /// Returns the gold lost.
    pub fn recover_from_defeat(&mut self, config: &BalanceConfig) -> u32 {
        self.hp = (self.max_hp / 2).max(1);
        self.location = Location::SAFE_HAVEN;
        let lost = (self.gold as f64 * config.defeat_gold_penalty).floor() as u32;
        self.gold -= lost.min(self.gold);
        lost
    }

    // ── Inventory & equipment ───────────────────────────────────────

    pub fn inventory(&self) -> &[Item] {
        self.inventory.items()
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn equipped_weapon(&self) -> Option<&Item> {
        self.equipment.weapon.as_ref()
    }

    pub fn equipped_armor(&self) -> Option<&Item> {
        self.equipment.armor.as_ref()
    }

    pub fn is_equipped(&self, item: &Item) -> bool {
        self.equipment.is_equipped(item)
    }

    pub fn count_item(&self, name: &str) -> u32 {
        self.inventory.count(name)
    }

    /// Copies of a name that can be spent without touching equipped gear.
    pub fn available_count(&self, name: &str) -> u32 {
        self.inventory
            .count(name)
            .saturating_sub(self.equipment.equipped_count(name))
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.find_by_name(name)
    }

    pub fn first_potion(&self) -> Option<&Item> {
        self.inventory.first_potion()
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.add(item);
        self.refresh_quests();
    }

    /// Removes one copy. The last copy of an equipped item stays put.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        if self.is_equipped(item) && self.inventory.copies_of(item) <= 1 {
            return false;
        }
        let removed = self.inventory.remove_one(item).is_some();
        if removed {
            self.refresh_quests();
        }
        removed
    }

    /// Spends `quantity` items by name, all or nothing. Equipped copies
    /// are never spent.
    pub fn consume_items(&mut self, name: &str, quantity: u32) -> bool {
        if self.available_count(name) < quantity {
            return false;
        }
        for _ in 0..quantity {
            let spendable = self
                .inventory
                .items()
                .iter()
                .find(|held| {
                    held.name == name
                        && (!self.equipment.is_equipped(held)
                            || self.inventory.copies_of(held) > 1)
                })
                .cloned();
            match spendable {
                Some(item) => {
                    self.inventory.remove_one(&item);
                }
                None => break,
            }
        }
        self.refresh_quests();
        true
    }

    /// Equips a held weapon or armor, replacing whatever sat in its slot.
    pub fn equip_item(&mut self, item: &Item) -> bool {
        let Some(slot) = EquipmentSlot::for_item(item) else {
            return false;
        };
        let Some(held) = self.inventory.items().iter().find(|held| *held == item).cloned() else {
            return false;
        };
        if let Some(previous) = self.equipment.set(slot, Some(held)) {
            tracing::debug!("Swapped out {}", previous.name);
        }
        true
    }

    pub fn unequip_item(&mut self, item: &Item) -> bool {
        let Some(slot) = EquipmentSlot::for_item(item) else {
            return false;
        };
        if self.equipment.get(slot).as_ref() != Some(item) {
            return false;
        }
        self.equipment.set(slot, None);
        true
    }

    /// Drinks a held potion. Anything else is refused.
    pub fn use_item(&mut self, item: &Item) -> bool {
        if !item.is_potion() {
            return false;
        }
        let Some(potion) = self.inventory.remove_one(item) else {
            return false;
        };
        let healed = self.heal(potion.stat());
        tracing::debug!("{} drank {} (+{} HP)", self.name, potion.name, healed);
        self.refresh_quests();
        true
    }

    // ── Travel ──────────────────────────────────────────────────────

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn unlocked_locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn can_travel_to(&self, location: Location) -> bool {
        self.unlocked.contains(&location)
    }

    /// Returns true if the location was newly unlocked.
    pub fn unlock_location(&mut self, location: Location) -> bool {
        let added = self.unlocked.insert(location);
        if added {
            tracing::info!("{} unlocked {}", self.name, location);
        }
        added
    }

    pub fn travel_to(&mut self, location: Location) -> bool {
        if !self.can_travel_to(location) {
            return false;
        }
        self.location = location;
        true
    }

    // ── Quests ──────────────────────────────────────────────────────

    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    pub fn add_quest(&mut self, quest: Quest) -> bool {
        self.quests.add(quest)
    }

    pub fn start_quest(&mut self, title: &str) -> bool {
        let started = self.quests.start(title);
        if started {
            self.refresh_quests();
        }
        started
    }

    /// Counts a kill on every active quest; returns the titles that moved.
    pub fn record_kill(&mut self, enemy_name: &str) -> Vec<String> {
        let inventory = &self.inventory;
        let equipment = &self.equipment;
        self.quests.record_kill(enemy_name, |name| {
            inventory
                .count(name)
                .saturating_sub(equipment.equipped_count(name))
        })
    }

    /// Turns in a finished quest: spends its required items, then grants
    /// exp, gold, reward items and reputation. Returns the reward granted.
    /// A refused turn-in leaves the player untouched.
    pub fn complete_quest(&mut self, title: &str) -> Option<QuestReward> {
        self.refresh_quests();
        let requirement = self.quests.active_quest(title)?.required_item.clone();
        let reward = self.quests.turn_in(title)?;
        // Completion already proved the items are held
        if let Some(requirement) = requirement {
            self.consume_items(&requirement.item_name, requirement.quantity);
        }

        self.add_exp(reward.exp);
        self.gold = self.gold.saturating_add(reward.gold);
        for item in &reward.items {
            self.add_item(item.clone());
        }
        self.adjust_reputation(QUEST_REPUTATION_REWARD);
        tracing::info!("{} turned in quest '{}'", self.name, title);
        Some(reward)
    }

    fn refresh_quests(&mut self) {
        let inventory = &self.inventory;
        let equipment = &self.equipment;
        self.quests.refresh(|name| {
            inventory
                .count(name)
                .saturating_sub(equipment.equipped_count(name))
        });
    }

    // ── Skills ──────────────────────────────────────────────────────

    pub fn skills(&self) -> &SkillTree {
        &self.skills
    }

    pub fn upgrade_skill(&mut self, name: &str) -> bool {
        match self.skills.upgrade(name, self.level) {
            Some(_) => {
                tracing::info!(
                    "{} raised {} to level {}",
                    self.name,
                    name,
                    self.skills.level_of(name)
                );
                true
            }
            None => false,
        }
    }

    // ── Time & weather ──────────────────────────────────────────────

    pub fn weather(&self) -> Weather {
        self.clock.weather
    }

    /// Advances play time; returns the new weather if it changed.
    pub fn advance_time(
        &mut self,
        delta_seconds: f64,
        config: &BalanceConfig,
        rng: &mut impl Rng,
    ) -> Option<Weather> {
        self.clock.advance(delta_seconds, config, rng)
    }
}
