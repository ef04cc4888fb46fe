//! Crafting recipes and the atomic craft operation.

use crate::character::Player;
use crate::items::catalog::{find_item, medium_health_potion, small_health_potion};
use crate::items::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGate {
    pub skill: String,
    pub min_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftError {
    #[error("need {needed} {material}, have {held}")]
    MissingMaterial {
        material: String,
        needed: u32,
        held: u32,
    },
    #[error("{skill} must be level {required} (currently {current})")]
    SkillTooLow {
        skill: String,
        required: u32,
        current: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingRecipe {
    pub name: String,
    pub result: Item,
    pub materials: BTreeMap<String, u32>,
    pub skill_gate: Option<SkillGate>,
}

impl CraftingRecipe {
    pub fn new(name: &str, result: Item) -> Self {
        Self {
            name: name.to_string(),
            result,
            materials: BTreeMap::new(),
            skill_gate: None,
        }
    }

    pub fn needs(mut self, material: &str, quantity: u32) -> Self {
        self.materials.insert(material.to_string(), quantity);
        self
    }

    pub fn gated_by(mut self, skill: &str, min_level: u32) -> Self {
        self.skill_gate = Some(SkillGate {
            skill: skill.to_string(),
            min_level,
        });
        self
    }

    /// Checks materials first, then the skill gate. Reports the first
    /// shortfall found.
    pub fn check(&self, player: &Player) -> Result<(), CraftError> {
        for (material, &needed) in &self.materials {
            let held = player.available_count(material);
            if held < needed {
                return Err(CraftError::MissingMaterial {
                    material: material.clone(),
                    needed,
                    held,
                });
            }
        }
        if let Some(gate) = &self.skill_gate {
            let current = player.skills().level_of(&gate.skill);
            if current < gate.min_level {
                return Err(CraftError::SkillTooLow {
                    skill: gate.skill.clone(),
                    required: gate.min_level,
                    current,
                });
            }
        }
        Ok(())
    }

    pub fn can_craft(&self, player: &Player) -> bool {
        self.check(player).is_ok()
    }

    /// Spends the materials and hands the result to the player. Nothing
    /// is consumed unless the whole requirement is met.
    pub fn craft(&self, player: &mut Player) -> Result<Item, CraftError> {
        self.check(player)?;
        for (material, &quantity) in &self.materials {
            if !player.consume_items(material, quantity) {
                return Err(CraftError::MissingMaterial {
                    material: material.clone(),
                    needed: quantity,
                    held: player.available_count(material),
                });
            }
        }
        player.add_item(self.result.clone());
        tracing::info!("{} crafted {}", player.name, self.result.name);
        Ok(self.result.clone())
    }
}

/// Recipes known to every character.
pub fn all_recipes() -> Vec<CraftingRecipe> {
    let iron_sword = find_item("Iron Sword").unwrap_or_else(|| Item::weapon("Iron Sword", 5, 30));
    let steel_sword =
        find_item("Steel Sword").unwrap_or_else(|| Item::weapon("Steel Sword", 8, 60));

    vec![
        CraftingRecipe::new("Small Health Potion", small_health_potion()).needs("Herbs", 3),
        CraftingRecipe::new("Medium Health Potion", medium_health_potion())
            .needs("Rare Herbs", 2)
            .needs("Herbs", 5)
            .gated_by("Alchemy", 2),
        CraftingRecipe::new("Iron Sword", iron_sword)
            .needs("Iron Ore", 2)
            .gated_by("Blacksmithing", 1),
        CraftingRecipe::new("Steel Sword", steel_sword)
            .needs("Iron Ore", 5)
            .gated_by("Blacksmithing", 3),
    ]
}

pub fn find_recipe(name: &str) -> Option<CraftingRecipe> {
    all_recipes().into_iter().find(|recipe| recipe.name == name)
}
