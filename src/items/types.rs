use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Payload-free item tag, used for equality and in save records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Potion,
    Material,
    Recipe,
    Misc,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "weapon",
            ItemCategory::Armor => "armor",
            ItemCategory::Potion => "potion",
            ItemCategory::Material => "material",
            ItemCategory::Recipe => "recipe",
            ItemCategory::Misc => "misc",
        }
    }
}

/// What an item does, with the one stat that matters for its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon { attack: u32 },
    Armor { defense: u32 },
    Potion { heal: u32 },
    Material,
    /// Teaches a crafting recipe; lists the materials it calls for.
    Recipe { materials: BTreeMap<String, u32> },
    Misc,
}

impl ItemKind {
    pub fn category(&self) -> ItemCategory {
        match self {
            ItemKind::Weapon { .. } => ItemCategory::Weapon,
            ItemKind::Armor { .. } => ItemCategory::Armor,
            ItemKind::Potion { .. } => ItemCategory::Potion,
            ItemKind::Material => ItemCategory::Material,
            ItemKind::Recipe { .. } => ItemCategory::Recipe,
            ItemKind::Misc => ItemCategory::Misc,
        }
    }

    /// The single stat value: attack for weapons, defense for armor,
    /// healing for potions, zero otherwise.
    pub fn stat(&self) -> u32 {
        match self {
            ItemKind::Weapon { attack } => *attack,
            ItemKind::Armor { defense } => *defense,
            ItemKind::Potion { heal } => *heal,
            ItemKind::Material | ItemKind::Recipe { .. } | ItemKind::Misc => 0,
        }
    }

    /// Rebuilds a kind from its flat (category, stat, materials) form.
    pub fn from_parts(
        category: ItemCategory,
        stat: u32,
        materials: BTreeMap<String, u32>,
    ) -> Self {
        match category {
            ItemCategory::Weapon => ItemKind::Weapon { attack: stat },
            ItemCategory::Armor => ItemKind::Armor { defense: stat },
            ItemCategory::Potion => ItemKind::Potion { heal: stat },
            ItemCategory::Material => ItemKind::Material,
            ItemCategory::Recipe => ItemKind::Recipe { materials },
            ItemCategory::Misc => ItemKind::Misc,
        }
    }
}

/// An immutable item descriptor. Two items are the same item when their
/// name and category match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    /// Gold value.
    pub value: u32,
    pub description: String,
}

impl Item {
    pub fn new(name: &str, kind: ItemKind, value: u32, description: &str) -> Self {
        let description = if description.is_empty() {
            format!("A {} called {}", kind.category().name(), name)
        } else {
            description.to_string()
        };
        Self {
            name: name.to_string(),
            kind,
            value,
            description,
        }
    }

    pub fn weapon(name: &str, attack: u32, value: u32) -> Self {
        Self::new(name, ItemKind::Weapon { attack }, value, "")
    }

    pub fn armor(name: &str, defense: u32, value: u32) -> Self {
        Self::new(name, ItemKind::Armor { defense }, value, "")
    }

    pub fn potion(name: &str, heal: u32, value: u32) -> Self {
        Self::new(name, ItemKind::Potion { heal }, value, "")
    }

    pub fn material(name: &str, value: u32) -> Self {
        Self::new(name, ItemKind::Material, value, "")
    }

    pub fn misc(name: &str, value: u32) -> Self {
        Self::new(name, ItemKind::Misc, value, "")
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn category(&self) -> ItemCategory {
        self.kind.category()
    }

    pub fn stat(&self) -> u32 {
        self.kind.stat()
    }

    pub fn is_potion(&self) -> bool {
        matches!(self.kind, ItemKind::Potion { .. })
    }

    /// Short stat label for display, e.g. "ATK +5".
    pub fn stat_label(&self) -> String {
        match &self.kind {
            ItemKind::Weapon { attack } => format!("ATK +{}", attack),
            ItemKind::Armor { defense } => format!("DEF +{}", defense),
            ItemKind::Potion { heal } => format!("HEAL +{}", heal),
            ItemKind::Material | ItemKind::Recipe { .. } | ItemKind::Misc => String::new(),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category() == other.category()
    }
}

impl Eq for Item {}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.stat_label();
        if label.is_empty() {
            write!(f, "{} ({}g)", self.name, self.value)
        } else {
            write!(f, "{} [{}] ({}g)", self.name, label, self.value)
        }
    }
}
