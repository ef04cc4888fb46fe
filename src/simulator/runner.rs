//! Plays simulated sessions through `GameState` with a fixed policy.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::combat::logic::{CombatPhase, EncounterSummary};
use crate::core::game_logic::{auto_battle, explore, ExploreOutcome};
use crate::core::game_state::GameState;
use crate::items::{EquipmentSlot, Item};
use crate::town::shop;
use crate::world::Location;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DRAGON_NAME: &str = "Ancient Dragon";
/// Level at which the policy starts hunting the dragon.
const DRAGON_HUNT_LEVEL: u32 = 12;
const POTION_STOCK_TARGET: u32 = 3;
/// Herbs kept back for the herbalist before brewing potions.
const HERB_RESERVE: u32 = 10;
const SKILL_PRIORITY: [&str; 3] = ["Sword Mastery", "Heavy Armor", "Survival"];

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, run_idx, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Level {}, Fights {}, Defeats {}, Gold {}, Dragon {}",
                run_idx + 1,
                config.num_runs,
                stats.final_level,
                stats.fights,
                stats.defeats,
                stats.final_gold,
                stats
                    .dragon_slain_at
                    .map(|at| format!("slain on explore {}", at))
                    .unwrap_or_else(|| "alive".to_string())
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one session until the dragon falls or the exploration limit runs out.
pub fn simulate_single_run(config: &SimConfig, run_idx: u32, rng: &mut impl Rng) -> RunStats {
    let mut state = GameState::new(&format!("Sim {}", run_idx + 1), config.balance.clone());
    let titles: Vec<String> = state
        .player
        .quests()
        .available
        .iter()
        .map(|q| q.title.clone())
        .collect();
    for title in &titles {
        state.player.start_quest(title);
    }

    let mut stats = RunStats::default();
    for exploration in 1..=config.max_encounters_per_run {
        stats.explorations = exploration;
        state.advance_time(config.seconds_per_exploration, rng);

        if needs_town_visit(&state) {
            visit_town(&mut state, &mut stats);
        }
        let ground = hunting_ground(&state);
        state.player.travel_to(ground);

        match explore(&mut state, rng) {
            Ok(ExploreOutcome::Encounter(_)) => {
                if let Some(summary) = auto_battle(&mut state, rng) {
                    record_fight(&mut stats, &summary);
                    spend_levels(&mut state, summary.levels_gained);
                    if summary.outcome == CombatPhase::Victory && summary.enemy_name == DRAGON_NAME
                    {
                        stats.dragon_slain_at = Some(exploration);
                        break;
                    }
                }
            }
            Ok(ExploreOutcome::Treasure { gold, item }) => {
                stats.gold_earned += gold as u64;
                if let Some(item) = item {
                    equip_if_better(&mut state, &item);
                }
            }
            Ok(ExploreOutcome::Gathered(_)) => stats.materials_gathered += 1,
            Err(e) => tracing::debug!("Exploration skipped: {}", e),
        }
    }

    stats.final_level = state.player.level();
    stats.final_gold = state.player.gold;
    stats
}

fn record_fight(stats: &mut RunStats, summary: &EncounterSummary) {
    stats.fights += 1;
    stats.rounds_fought += summary.rounds as u64;
    stats.gold_earned += summary.gold_gained as u64;
    stats.gold_lost += summary.gold_lost as u64;
    stats.loot_drops += summary.loot.len() as u32;
    match summary.outcome {
        CombatPhase::Victory => {
            stats.victories += 1;
            if summary.enemy_name == DRAGON_NAME {
                stats.boss_kills += 1;
            }
        }
        CombatPhase::Defeat => stats.defeats += 1,
        CombatPhase::Fled => stats.escapes += 1,
        CombatPhase::PlayerTurn | CombatPhase::EnemyTurn => {}
    }
}

fn needs_town_visit(state: &GameState) -> bool {
    let player = &state.player;
    player.hp * 2 < player.max_hp() || player.location().is_safe()
}

/// Dragon's Keep once strong enough, otherwise the toughest open wilds.
fn hunting_ground(state: &GameState) -> Location {
    let player = &state.player;
    if player.level() >= DRAGON_HUNT_LEVEL && player.can_travel_to(Location::DragonsKeep) {
        return Location::DragonsKeep;
    }
    [Location::MountainPass, Location::DarkCave]
        .into_iter()
        .find(|&loc| player.can_travel_to(loc))
        .unwrap_or(Location::StartingForest)
}

/// Turn in quests, heal, restock potions and brew from spare herbs.
fn visit_town(state: &mut GameState, stats: &mut RunStats) {
    if !state.player.travel_to(Location::GreenfieldTown) {
        return;
    }

    let finished: Vec<String> = state
        .player
        .quests()
        .active
        .iter()
        .filter(|q| q.completed)
        .map(|q| q.title.clone())
        .collect();
    for title in finished {
        if let Some(reward) = state.player.complete_quest(&title) {
            stats.quests_completed += 1;
            for item in &reward.items {
                equip_if_better(state, item);
            }
        }
    }

    if state.player.hp < state.player.max_hp() {
        if let Err(e) = shop::heal(&mut state.player, &state.config) {
            tracing::debug!("Healer refused: {}", e);
        }
    }

    if let Some(recipe) = state.find_recipe("Small Health Potion").cloned() {
        while potion_count(state) < POTION_STOCK_TARGET
            && state.player.available_count("Herbs") >= HERB_RESERVE + 3
            && recipe.craft(&mut state.player).is_ok()
        {}
    }
    while potion_count(state) < POTION_STOCK_TARGET
        && shop::buy(&mut state.player, "Small Health Potion").is_ok()
    {}
}

fn potion_count(state: &GameState) -> u32 {
    state
        .player
        .inventory()
        .iter()
        .filter(|item| item.is_potion())
        .count() as u32
}

fn equip_if_better(state: &mut GameState, item: &Item) {
    let current = match EquipmentSlot::for_item(item) {
        Some(EquipmentSlot::Weapon) => state.player.equipped_weapon(),
        Some(EquipmentSlot::Armor) => state.player.equipped_armor(),
        None => return,
    };
    if current.map_or(0, |held| held.stat()) < item.stat() {
        state.player.equip_item(item);
    }
}

fn spend_levels(state: &mut GameState, levels: u32) {
    for _ in 0..levels {
        let upgraded = SKILL_PRIORITY
            .iter()
            .cycle()
            .skip(state.player.level() as usize % SKILL_PRIORITY.len())
            .take(SKILL_PRIORITY.len())
            .any(|name| state.player.upgrade_skill(name));
        if !upgraded {
            break;
        }
    }
}
