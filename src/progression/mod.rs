//! Quest tracking and crafting.

pub mod crafting;
pub mod quests;

pub use crafting::{all_recipes, CraftError, CraftingRecipe};
pub use quests::{quest_board, Quest, QuestLog, QuestReward};
