use super::config::BalanceConfig;
use crate::character::Player;
use crate::combat::logic::Encounter;
use crate::progression::crafting::{all_recipes, CraftingRecipe};
use crate::progression::quests::quest_board;
use crate::world::Weather;
use rand::Rng;

/// One running session: the character, the balance numbers, the recipe
/// book, and the fight in progress (if any). The encounter is transient
/// and never saved.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Player,
    pub config: BalanceConfig,
    pub recipes: Vec<CraftingRecipe>,
    pub encounter: Option<Encounter>,
}

impl GameState {
    /// A new character with the quest board posted.
    pub fn new(name: &str, config: BalanceConfig) -> Self {
        let mut player = Player::new(name);
        for quest in quest_board() {
            player.add_quest(quest);
        }
        Self::from_player(player, config)
    }

    /// Wraps a loaded character.
    pub fn from_player(player: Player, config: BalanceConfig) -> Self {
        Self {
            player,
            config,
            recipes: all_recipes(),
            encounter: None,
        }
    }

    pub fn in_combat(&self) -> bool {
        self.encounter.as_ref().is_some_and(|e| !e.is_over())
    }

    pub fn find_recipe(&self, name: &str) -> Option<&CraftingRecipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.name.eq_ignore_ascii_case(name))
    }

    /// Advances the world clock; returns the new weather if it changed.
    pub fn advance_time(&mut self, delta_seconds: f64, rng: &mut impl Rng) -> Option<Weather> {
        self.player.advance_time(delta_seconds, &self.config, rng)
    }
}
