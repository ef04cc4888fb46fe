use super::types::{Item, ItemKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    /// The slot an item occupies, or None for items that cannot be worn.
    pub fn for_item(item: &Item) -> Option<Self> {
        match item.kind {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            ItemKind::Armor { .. } => Some(EquipmentSlot::Armor),
            ItemKind::Potion { .. }
            | ItemKind::Material
            | ItemKind::Recipe { .. }
            | ItemKind::Misc => None,
        }
    }
}

/// Worn gear. Each equipped item is also held in the owner's inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
        }
    }

    /// Puts an item into a slot, returning whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) -> Option<Item> {
        match slot {
            EquipmentSlot::Weapon => std::mem::replace(&mut self.weapon, item),
            EquipmentSlot::Armor => std::mem::replace(&mut self.armor, item),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn is_equipped(&self, item: &Item) -> bool {
        self.iter_equipped().any(|equipped| equipped == item)
    }

    /// Number of equipped copies carrying this name.
    pub fn equipped_count(&self, name: &str) -> u32 {
        self.iter_equipped().filter(|item| item.name == name).count() as u32
    }

    pub fn attack_bonus(&self) -> u32 {
        self.weapon.as_ref().map_or(0, Item::stat)
    }

    pub fn defense_bonus(&self) -> u32 {
        self.armor.as_ref().map_or(0, Item::stat)
    }
}
