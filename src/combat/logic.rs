//! Turn-based encounter state machine: one player action, then (if the
//! fight goes on) one enemy action per round.

use super::types::{CombatLogEntry, Enemy};
use crate::character::Player;
use crate::core::config::BalanceConfig;
use crate::core::constants::MIN_DAMAGE;
use crate::items::Item;
use crate::world::Location;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
    Fled,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CombatPhase::Victory | CombatPhase::Defeat | CombatPhase::Fled
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    Defend,
    /// Drinks the first potion in the inventory.
    UseItem,
    Flee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
    },
    PlayerDefend,
    PotionUsed {
        name: String,
        healed: u32,
    },
    NoPotions,
    FleeSucceeded,
    FleeFailed,
    EnemyAttack {
        damage: u32,
        defended: bool,
    },
    EnemyDied {
        exp_gained: u64,
        gold_gained: u32,
    },
    LootDropped {
        item: Item,
    },
    LevelUp {
        new_level: u32,
    },
    QuestProgress {
        title: String,
    },
    LocationUnlocked {
        location: Location,
    },
    PlayerDied {
        gold_lost: u32,
    },
}

/// What an encounter produced once it ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub enemy_name: String,
    pub outcome: CombatPhase,
    pub rounds: u32,
    pub exp_gained: u64,
    pub gold_gained: u32,
    pub gold_lost: u32,
    pub loot: Vec<Item>,
    pub levels_gained: u32,
    pub quests_progressed: Vec<String>,
    pub locations_unlocked: Vec<Location>,
}

impl EncounterSummary {
    fn new(enemy_name: &str) -> Self {
        Self {
            enemy_name: enemy_name.to_string(),
            outcome: CombatPhase::PlayerTurn,
            rounds: 0,
            exp_gained: 0,
            gold_gained: 0,
            gold_lost: 0,
            loot: Vec::new(),
            levels_gained: 0,
            quests_progressed: Vec::new(),
            locations_unlocked: Vec::new(),
        }
    }
}

/// One fight between the player and a single enemy.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub enemy: Enemy,
    phase: CombatPhase,
    defending: bool,
    phase_history: Vec<CombatPhase>,
    log: Vec<CombatLogEntry>,
    summary: EncounterSummary,
}

impl Encounter {
    pub fn new(enemy: Enemy) -> Self {
        let summary = EncounterSummary::new(&enemy.name);
        Self {
            enemy,
            phase: CombatPhase::PlayerTurn,
            defending: false,
            phase_history: vec![CombatPhase::PlayerTurn],
            log: Vec::new(),
            summary,
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Every phase entered so far, in order.
    pub fn phase_history(&self) -> &[CombatPhase] {
        &self.phase_history
    }

    pub fn log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    pub fn summary(&self) -> &EncounterSummary {
        &self.summary
    }

    /// Resolves one round: the player's action, then the enemy's reply if
    /// the fight is still on. Actions after the fight ended are ignored.
    pub fn take_turn(
        &mut self,
        player: &mut Player,
        action: CombatAction,
        config: &BalanceConfig,
        rng: &mut impl Rng,
    ) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.phase != CombatPhase::PlayerTurn {
            return events;
        }
        self.summary.rounds += 1;
        tracing::debug!("Round {}: {:?} vs {}", self.summary.rounds, action, self.enemy.name);

        match action {
            CombatAction::Attack => {
                let raw = player
                    .attack()
                    .saturating_sub(self.enemy.defense / 2)
                    .max(MIN_DAMAGE);
                let damage = self.enemy.take_damage(raw, player.weather());
                self.record(
                    format!("You hit the {} for {} damage!", self.enemy.name, damage),
                    true,
                );
                events.push(CombatEvent::PlayerAttack { damage });
                if !self.enemy.is_alive() {
                    self.win(player, rng, &mut events);
                    return events;
                }
            }
            CombatAction::Defend => {
                self.defending = true;
                self.record("You raise your guard.".to_string(), true);
                events.push(CombatEvent::PlayerDefend);
            }
            CombatAction::UseItem => match player.first_potion().cloned() {
                Some(potion) => {
                    let before = player.hp;
                    player.use_item(&potion);
                    let healed = player.hp - before;
                    self.record(
                        format!("You drink a {} and recover {} HP.", potion.name, healed),
                        true,
                    );
                    events.push(CombatEvent::PotionUsed {
                        name: potion.name,
                        healed,
                    });
                }
                None => {
                    self.record("You have no potions!".to_string(), true);
                    events.push(CombatEvent::NoPotions);
                }
            },
            CombatAction::Flee => {
                let chance = if self.enemy.is_boss {
                    config.boss_flee_chance
                } else {
                    config.flee_chance
                };
                if rng.gen::<f64>() < chance {
                    self.record("You escaped!".to_string(), true);
                    events.push(CombatEvent::FleeSucceeded);
                    self.enter(CombatPhase::Fled);
                    self.summary.outcome = CombatPhase::Fled;
                    return events;
                }
                self.record("You failed to escape!".to_string(), true);
                events.push(CombatEvent::FleeFailed);
            }
        }

        self.enter(CombatPhase::EnemyTurn);
        self.enemy_turn(player, config, &mut events);
        events
    }

    /// Plays the encounter to the end, asking `chooser` for each action.
    pub fn run(
        &mut self,
        player: &mut Player,
        mut chooser: impl FnMut(&Player, &Enemy) -> CombatAction,
        config: &BalanceConfig,
        rng: &mut impl Rng,
    ) -> EncounterSummary {
        while !self.is_over() {
            let action = chooser(player, &self.enemy);
            self.take_turn(player, action, config, rng);
        }
        self.summary.clone()
    }

    fn enemy_turn(
        &mut self,
        player: &mut Player,
        config: &BalanceConfig,
        events: &mut Vec<CombatEvent>,
    ) {
        let defended = std::mem::take(&mut self.defending);
        let mut raw = self
            .enemy
            .attack_power(player.weather())
            .saturating_sub(player.defense() / 2)
            .max(MIN_DAMAGE);
        if defended {
            raw = ((raw as f64 * config.defend_damage_factor).floor() as u32).max(MIN_DAMAGE);
        }
        let damage = player.take_damage(raw);
        self.record(
            format!("The {} hits you for {} damage!", self.enemy.name, damage),
            false,
        );
        events.push(CombatEvent::EnemyAttack { damage, defended });

        if player.is_alive() {
            self.enter(CombatPhase::PlayerTurn);
        } else {
            self.lose(player, config, events);
        }
    }

    fn win(&mut self, player: &mut Player, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        self.enter(CombatPhase::Victory);
        self.summary.outcome = CombatPhase::Victory;

        let exp = self.enemy.exp_reward;
        let gold = self.enemy.gold_reward;
        let levels = player.add_exp(exp);
        player.gold = player.gold.saturating_add(gold);
        self.summary.exp_gained = exp;
        self.summary.gold_gained = gold;
        self.summary.levels_gained = levels;
        self.record(
            format!(
                "You defeated the {}! Gained {} EXP and {} gold.",
                self.enemy.name, exp, gold
            ),
            true,
        );
        events.push(CombatEvent::EnemyDied {
            exp_gained: exp,
            gold_gained: gold,
        });
        if levels > 0 {
            self.record(format!("You reached level {}!", player.level()), true);
            events.push(CombatEvent::LevelUp {
                new_level: player.level(),
            });
        }

        let loot = self.enemy.generate_loot(rng);
        for item in &loot {
            self.record(format!("Found: {}", item.name), true);
            events.push(CombatEvent::LootDropped { item: item.clone() });
            player.add_item(item.clone());
        }
        self.summary.loot = loot;

        let progressed = player.record_kill(&self.enemy.name);
        for title in &progressed {
            self.record(format!("Quest progress: {}", title), true);
            events.push(CombatEvent::QuestProgress {
                title: title.clone(),
            });
        }
        self.summary.quests_progressed = progressed;

        if self.enemy.is_boss {
            for &location in Location::unlocked_by_boss() {
                if player.unlock_location(location) {
                    self.record(format!("New area unlocked: {}", location), true);
                    events.push(CombatEvent::LocationUnlocked { location });
                    self.summary.locations_unlocked.push(location);
                }
            }
        }
        tracing::debug!("{} defeated {}", player.name, self.enemy.name);
    }

    fn lose(&mut self, player: &mut Player, config: &BalanceConfig, events: &mut Vec<CombatEvent>) {
        self.enter(CombatPhase::Defeat);
        self.summary.outcome = CombatPhase::Defeat;
        let gold_lost = player.recover_from_defeat(config);
        self.summary.gold_lost = gold_lost;
        self.record(
            format!(
                "You were defeated by the {}. You wake up in {} and lost {} gold.",
                self.enemy.name,
                Location::SAFE_HAVEN,
                gold_lost
            ),
            false,
        );
        events.push(CombatEvent::PlayerDied { gold_lost });
        tracing::debug!("{} was defeated by {}", player.name, self.enemy.name);
    }

    fn enter(&mut self, phase: CombatPhase) {
        self.phase = phase;
        self.phase_history.push(phase);
    }

    fn record(&mut self, message: String, is_player_action: bool) {
        self.log.push(CombatLogEntry {
            message,
            is_player_action,
        });
    }
}

/// Drinks a potion below a third of max hp, otherwise attacks.
pub fn basic_strategy(player: &Player, _enemy: &Enemy) -> CombatAction {
    if player.hp * 3 < player.max_hp() && player.first_potion().is_some() {
        CombatAction::UseItem
    } else {
        CombatAction::Attack
    }
}
