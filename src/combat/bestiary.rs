//! Authored enemy roster.

use super::types::Enemy;
use crate::items::catalog::{find_item, medium_health_potion, small_health_potion};
use crate::items::Item;
use rand::seq::SliceRandom;
use rand::Rng;

/// Catalog item by name, falling back to a plain misc item so an authored
/// table never silently loses a row.
fn catalog_or_misc(name: &str, value: u32) -> Item {
    find_item(name).unwrap_or_else(|| Item::misc(name, value))
}

pub fn goblin() -> Enemy {
    Enemy::new("Goblin", 1, 30, 8, 2, 25, 10)
        .with_loot(Item::weapon("Rusty Dagger", 3, 15), 0.4)
        .with_loot(Item::misc("Goblin Ear", 5), 0.8)
}

pub fn wild_wolf() -> Enemy {
    Enemy::new("Wild Wolf", 1, 40, 12, 1, 30, 15)
        .with_loot(Item::misc("Wolf Fang", 10), 0.7)
        .with_loot(Item::misc("Wolf Pelt", 20), 0.5)
}

pub fn bandit() -> Enemy {
    Enemy::new("Bandit", 2, 50, 15, 5, 45, 25)
        .with_loot(Item::weapon("Short Sword", 5, 30), 0.3)
        .with_loot(Item::armor("Leather Armor", 4, 40), 0.2)
        .with_loot(small_health_potion(), 0.4)
}

pub fn orc_warrior() -> Enemy {
    Enemy::new("Orc Warrior", 3, 80, 20, 8, 70, 40)
        .with_loot(Item::weapon("Orcish Axe", 8, 60), 0.4)
        .with_loot(Item::misc("Orc Tusk", 30), 0.9)
        .with_loot(medium_health_potion(), 0.3)
}

pub fn skeleton_warrior() -> Enemy {
    Enemy::new("Skeleton Warrior", 4, 60, 25, 10, 80, 50)
        .with_loot(Item::misc("Bone Fragments", 20), 0.8)
        .with_loot(Item::weapon("Ancient Sword", 10, 80), 0.2)
}

pub fn giant_spider() -> Enemy {
    Enemy::new("Giant Spider", 5, 100, 18, 5, 90, 60)
        .with_loot(catalog_or_misc("Spider Silk", 40), 0.7)
        .with_loot(Item::material("Spider Venom", 60), 0.4)
}

pub fn ancient_dragon() -> Enemy {
    Enemy::new("Ancient Dragon", 10, 300, 40, 20, 500, 200)
        .as_boss()
        .with_loot(catalog_or_misc("Dragon Scale Armor", 300), 1.0)
        .with_loot(catalog_or_misc("Dragonbone Sword", 400), 1.0)
        .with_loot(catalog_or_misc("Large Health Potion", 40), 0.8)
}

/// Every authored enemy, regular ones first.
pub fn all_enemies() -> Vec<Enemy> {
    vec![
        goblin(),
        wild_wolf(),
        bandit(),
        orc_warrior(),
        skeleton_warrior(),
        giant_spider(),
        ancient_dragon(),
    ]
}

pub fn regular_enemies() -> Vec<Enemy> {
    all_enemies().into_iter().filter(|e| !e.is_boss).collect()
}

pub fn bosses() -> Vec<Enemy> {
    all_enemies().into_iter().filter(|e| e.is_boss).collect()
}

pub fn find_enemy(name: &str) -> Option<Enemy> {
    all_enemies().into_iter().find(|e| e.name == name)
}

/// Picks a regular enemy and levels it around the player.
pub fn random_encounter(player_level: u32, rng: &mut impl Rng) -> Option<Enemy> {
    let roster = regular_enemies();
    let template = roster.choose(rng)?;
    Some(template.scaled_for_player(player_level, rng))
}

/// Picks a boss. Bosses are never rescaled.
pub fn random_boss(rng: &mut impl Rng) -> Option<Enemy> {
    bosses().choose(rng).cloned()
}
