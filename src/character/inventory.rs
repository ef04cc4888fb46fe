use crate::items::Item;
use serde::{Deserialize, Serialize};

/// Items a character carries. Duplicates are separate entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.iter().any(|held| held == item)
    }

    /// Copies of the given item (name and category).
    pub fn copies_of(&self, item: &Item) -> u32 {
        self.items.iter().filter(|held| *held == item).count() as u32
    }

    /// Entries carrying this name, regardless of category.
    pub fn count(&self, name: &str) -> u32 {
        self.items.iter().filter(|held| held.name == name).count() as u32
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|held| held.name == name)
    }

    pub fn first_potion(&self) -> Option<&Item> {
        self.items.iter().find(|held| held.is_potion())
    }

    /// Removes one copy, returning it.
    pub fn remove_one(&mut self, item: &Item) -> Option<Item> {
        let index = self.items.iter().position(|held| held == item)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_copies() {
        let mut inv = Inventory::new();
        inv.add(Item::material("Herbs", 5));
        inv.add(Item::material("Herbs", 5));
        inv.add(Item::weapon("Iron Sword", 5, 30));
        assert_eq!(inv.count("Herbs"), 2);
        assert_eq!(inv.copies_of(&Item::material("Herbs", 5)), 2);
        assert_eq!(inv.count("Iron Ore"), 0);
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_remove_one_missing() {
        let mut inv = Inventory::new();
        assert!(inv.remove_one(&Item::misc("Key", 0)).is_none());
        assert!(inv.is_empty());
    }

    #[test]
    fn test_first_potion() {
        let mut inv = Inventory::new();
        inv.add(Item::material("Herbs", 5));
        assert!(inv.first_potion().is_none());
        inv.add(Item::potion("Small Health Potion", 20, 15));
        assert_eq!(
            inv.first_potion().map(|p| p.name.as_str()),
            Some("Small Health Potion")
        );
    }
}
