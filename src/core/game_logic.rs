//! Exploration and the glue between a running session and its fights.

use super::constants::*;
use super::game_state::GameState;
use crate::combat::bestiary;
use crate::combat::logic::{basic_strategy, CombatAction, CombatEvent, Encounter, EncounterSummary};
use crate::combat::types::{CombatLogEntry, Enemy};
use crate::items::catalog::{all_items, gatherable_materials};
use crate::items::Item;
use crate::world::Location;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ExploreOutcome {
    /// A fight started; the enemy is now in `state.encounter`.
    Encounter(Enemy),
    Treasure { gold: u32, item: Option<Item> },
    Gathered(Item),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExploreError {
    #[error("{0} is safe; there is nothing to explore")]
    SafeZone(Location),
    #[error("finish the current fight first")]
    InCombat,
}

/// Explores the current location: 60% a fight, 20% treasure, 20% materials.
pub fn explore(state: &mut GameState, rng: &mut impl Rng) -> Result<ExploreOutcome, ExploreError> {
    if state.in_combat() {
        return Err(ExploreError::InCombat);
    }
    let location = state.player.location();
    if location.is_safe() {
        return Err(ExploreError::SafeZone(location));
    }

    let roll = rng.gen::<f64>();
    if roll < EXPLORE_ENCOUNTER_THRESHOLD {
        let enemy = spawn_enemy(state, rng);
        tracing::debug!("Encounter at {}: {} (level {})", location, enemy.name, enemy.level);
        state.encounter = Some(Encounter::new(enemy.clone()));
        Ok(ExploreOutcome::Encounter(enemy))
    } else if roll < EXPLORE_TREASURE_THRESHOLD {
        let level = state.player.level();
        let gold = rng.gen_range(TREASURE_GOLD_MIN..=TREASURE_GOLD_MAX) * level;
        state.player.gold = state.player.gold.saturating_add(gold);
        let item = if rng.gen::<f64>() < TREASURE_ITEM_CHANCE {
            all_items().choose(rng).cloned()
        } else {
            None
        };
        if let Some(found) = &item {
            state.player.add_item(found.clone());
        }
        Ok(ExploreOutcome::Treasure { gold, item })
    } else {
        let material = gatherable_materials()
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| Item::material("Herbs", 5));
        state.player.add_item(material.clone());
        Ok(ExploreOutcome::Gathered(material))
    }
}

/// Bosses guard Dragon's Keep; veterans may also run into one anywhere.
fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> Enemy {
    let level = state.player.level();
    let boss_roll = state.player.location() == Location::DragonsKeep
        || (level >= BOSS_ENCOUNTER_MIN_LEVEL && rng.gen::<f64>() < BOSS_ENCOUNTER_CHANCE);
    let enemy = if boss_roll {
        bestiary::random_boss(rng)
    } else {
        bestiary::random_encounter(level, rng)
    };
    enemy.unwrap_or_else(|| bestiary::goblin().scaled_for_player(level, rng))
}

/// Result of one combat round driven through the session.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub events: Vec<CombatEvent>,
    /// Log lines written this round.
    pub log: Vec<CombatLogEntry>,
    /// Set when the round ended the fight.
    pub finished: Option<EncounterSummary>,
}

/// Plays one round of the current fight. Returns None outside combat.
pub fn combat_turn(
    state: &mut GameState,
    action: CombatAction,
    rng: &mut impl Rng,
) -> Option<TurnReport> {
    let encounter = state.encounter.as_mut()?;
    let seen = encounter.log().len();
    let events = encounter.take_turn(&mut state.player, action, &state.config, rng);
    let log = encounter.log()[seen..].to_vec();
    let finished = encounter.is_over().then(|| encounter.summary().clone());
    if finished.is_some() {
        state.encounter = None;
    }
    Some(TurnReport {
        events,
        log,
        finished,
    })
}

/// Fights the current encounter to the end with `basic_strategy`.
pub fn auto_battle(state: &mut GameState, rng: &mut impl Rng) -> Option<EncounterSummary> {
    let mut encounter = state.encounter.take()?;
    let summary = encounter.run(&mut state.player, basic_strategy, &state.config, rng);
    Some(summary)
}
