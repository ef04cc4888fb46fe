//! Authored item definitions.

use super::types::{Item, ItemKind};
use std::collections::BTreeMap;

/// Every item a merchant or treasure chest can hand out.
pub fn all_items() -> Vec<Item> {
    vec![
        // Weapons
        Item::weapon("Wooden Sword", 2, 10).with_description("A basic wooden training sword"),
        Item::weapon("Iron Sword", 5, 30).with_description("A standard iron sword"),
        Item::weapon("Steel Sword", 8, 60).with_description("A well-made steel sword"),
        Item::weapon("Silver Sword", 12, 100)
            .with_description("A sword made of silver, effective against undead"),
        Item::weapon("Dragonbone Sword", 30, 400)
            .with_description("A powerful sword made from dragon bones"),
        // Armor
        Item::armor("Leather Vest", 3, 20)
            .with_description("Simple leather armor offering minimal protection"),
        Item::armor("Chainmail", 7, 50).with_description("Flexible chainmail armor"),
        Item::armor("Plate Armor", 12, 100)
            .with_description("Heavy plate armor offering excellent protection"),
        Item::armor("Silver Armor", 18, 200)
            .with_description("Armor made of silver, effective against undead"),
        Item::armor("Dragon Scale Armor", 25, 300)
            .with_description("Armor made from dragon scales"),
        // Potions
        small_health_potion(),
        medium_health_potion(),
        Item::potion("Large Health Potion", 60, 40)
            .with_description("Restores a large amount of health"),
        Item::potion("Elixir of Life", 100, 100).with_description("Fully restores health"),
        // Materials
        herbs(),
        rare_herbs(),
        iron_ore(),
        Item::material("Silver Ore", 30).with_description("Silver ore that can be smelted"),
        Item::material("Dragon Scales", 100).with_description("Rare scales from a dragon"),
        Item::material("Spider Silk", 40).with_description("Strong silk from giant spiders"),
        // Recipes
        recipe_scroll(
            "Health Potion Recipe",
            50,
            "Teaches how to craft health potions",
            &[("Herbs", 3)],
        ),
        recipe_scroll(
            "Iron Sword Recipe",
            80,
            "Teaches how to craft iron swords",
            &[("Iron Ore", 2)],
        ),
        // Misc
        Item::misc("Ancient Key", 0).with_description("An ancient key to unlock hidden areas"),
        Item::misc("Treasure Map", 50).with_description("A map leading to hidden treasure"),
    ]
}

/// Looks up a catalog item by exact name.
pub fn find_item(name: &str) -> Option<Item> {
    all_items().into_iter().find(|item| item.name == name)
}

/// Items a merchant keeps in stock.
pub fn shop_stock() -> Vec<Item> {
    all_items()
        .into_iter()
        .filter(|item| {
            matches!(
                item.kind,
                ItemKind::Weapon { .. } | ItemKind::Armor { .. } | ItemKind::Potion { .. }
            ) && item.value > 0
                && item.value <= 200
        })
        .collect()
}

/// Materials that can be picked up while gathering.
pub fn gatherable_materials() -> Vec<Item> {
    vec![herbs(), iron_ore(), rare_herbs()]
}

pub fn small_health_potion() -> Item {
    Item::potion("Small Health Potion", 20, 15)
        .with_description("Restores a small amount of health")
}

pub fn medium_health_potion() -> Item {
    Item::potion("Medium Health Potion", 35, 25)
        .with_description("Restores a moderate amount of health")
}

pub fn herbs() -> Item {
    Item::material("Herbs", 5).with_description("Common herbs used in potion making")
}

pub fn rare_herbs() -> Item {
    Item::material("Rare Herbs", 15).with_description("Rare herbs used in advanced potions")
}

pub fn iron_ore() -> Item {
    Item::material("Iron Ore", 10).with_description("Iron ore that can be smelted")
}

fn recipe_scroll(name: &str, value: u32, description: &str, materials: &[(&str, u32)]) -> Item {
    let materials: BTreeMap<String, u32> = materials
        .iter()
        .map(|(material, quantity)| (material.to_string(), *quantity))
        .collect();
    Item::new(name, ItemKind::Recipe { materials }, value, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::ItemCategory;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_unique() {
        let items = all_items();
        let names: HashSet<_> = items.iter().map(|i| i.name.clone()).collect();
        assert_eq!(names.len(), items.len());
    }

    #[test]
    fn test_find_item() {
        let sword = find_item("Iron Sword").expect("Iron Sword is in the catalog");
        assert_eq!(sword.category(), ItemCategory::Weapon);
        assert_eq!(sword.stat(), 5);
        assert!(find_item("Excalibur").is_none());
    }

    #[test]
    fn test_shop_stock_only_sells_gear_and_potions() {
        let stock = shop_stock();
        assert!(!stock.is_empty());
        for item in &stock {
            assert!(matches!(
                item.category(),
                ItemCategory::Weapon | ItemCategory::Armor | ItemCategory::Potion
            ));
        }
        assert!(!stock.iter().any(|i| i.name == "Dragonbone Sword"));
    }

    #[test]
    fn test_recipe_scroll_lists_materials() {
        let scroll = find_item("Health Potion Recipe").unwrap();
        match scroll.kind {
            ItemKind::Recipe { materials } => assert_eq!(materials.get("Herbs"), Some(&3)),
            other => panic!("expected recipe, got {:?}", other),
        }
    }
}
