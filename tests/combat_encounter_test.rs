//! Integration test: full encounters through the combat state machine
//!
//! Drives `Encounter::take_turn` the way a front end would and checks the
//! rewards, penalties and phase sequence that come out the other end.

use epic_adventure::character::Player;
use epic_adventure::combat::bestiary;
use epic_adventure::combat::logic::{CombatAction, CombatEvent, CombatPhase, Encounter};
use epic_adventure::core::config::BalanceConfig;
use epic_adventure::world::Location;
use rand::rngs::mock::StepRng;

/// A level-1 hero always attacking a Goblin in clear weather: 9 damage per
/// hit, so four hits, with the goblin answering three times for 1 each.
#[test]
fn test_level_one_hero_defeats_goblin() {
    let config = BalanceConfig::default();
    let mut player = Player::new("Integration Hero");
    assert_eq!(player.attack(), 12);
    assert_eq!(player.defense(), 8);
    let inventory_before = player.inventory().len();

    let mut encounter = Encounter::new(bestiary::goblin());
    // A zero draw drops every loot entry with a positive chance.
    let mut rng = StepRng::new(0, 0);

    let mut hits = Vec::new();
    while !encounter.is_over() {
        for event in encounter.take_turn(&mut player, CombatAction::Attack, &config, &mut rng) {
            if let CombatEvent::PlayerAttack { damage } = event {
                hits.push(damage);
            }
        }
    }

    assert_eq!(hits, vec![9, 9, 9, 9]);
    assert_eq!(encounter.phase(), CombatPhase::Victory);
    assert_eq!(
        encounter.phase_history(),
        &[
            CombatPhase::PlayerTurn,
            CombatPhase::EnemyTurn,
            CombatPhase::PlayerTurn,
            CombatPhase::EnemyTurn,
            CombatPhase::PlayerTurn,
            CombatPhase::EnemyTurn,
            CombatPhase::PlayerTurn,
            CombatPhase::Victory,
        ]
    );

    let summary = encounter.summary();
    assert_eq!(summary.rounds, 4);
    assert_eq!(summary.exp_gained, 25);
    assert_eq!(summary.gold_gained, 10);
    assert_eq!(player.exp(), 25);
    assert_eq!(player.gold, 60);
    assert_eq!(player.hp, 97);

    // Rusty Dagger and Goblin Ear, granted exactly once
    assert_eq!(summary.loot.len(), 2);
    assert_eq!(player.inventory().len(), inventory_before + 2);

    // Further actions are ignored once the fight is over
    let events = encounter.take_turn(&mut player, CombatAction::Attack, &config, &mut rng);
    assert!(events.is_empty());
    assert_eq!(player.inventory().len(), inventory_before + 2);
    assert_eq!(player.exp(), 25);
}

#[test]
fn test_defending_halves_the_next_hit_only() {
    let config = BalanceConfig::default();
    let mut player = Player::new("Guardian");
    let mut encounter = Encounter::new(bestiary::orc_warrior());
    let mut rng = StepRng::new(u64::MAX, 0);

    // Orc raw hit: 20 - 8/2 = 16; defended 8; both minus defense 8
    let events = encounter.take_turn(&mut player, CombatAction::Defend, &config, &mut rng);
    assert!(events.contains(&CombatEvent::EnemyAttack {
        damage: 1,
        defended: true
    }));

    let events = encounter.take_turn(&mut player, CombatAction::Attack, &config, &mut rng);
    assert!(events.contains(&CombatEvent::EnemyAttack {
        damage: 8,
        defended: false
    }));
    assert_eq!(player.hp, 100 - 1 - 8);
}

#[test]
fn test_defeat_sends_hero_to_town_poorer() {
    let config = BalanceConfig::default();
    let mut player = Player::new("Doomed");
    let mut encounter = Encounter::new(bestiary::ancient_dragon());
    let mut rng = StepRng::new(u64::MAX, 0);

    while !encounter.is_over() {
        encounter.take_turn(&mut player, CombatAction::Attack, &config, &mut rng);
    }

    assert_eq!(encounter.phase(), CombatPhase::Defeat);
    let summary = encounter.summary();
    assert_eq!(summary.gold_lost, 15);
    assert_eq!(summary.exp_gained, 0);
    assert!(summary.loot.is_empty());
    assert_eq!(player.gold, 35);
    assert_eq!(player.hp, 50);
    assert_eq!(player.location(), Location::GreenfieldTown);
    assert!(encounter.enemy.is_alive());
}

#[test]
fn test_flee_rules_differ_for_bosses() {
    let config = BalanceConfig::default();
    let mut rng = StepRng::new(0, 0);

    let mut player = Player::new("Runner");
    let mut goblin_fight = Encounter::new(bestiary::goblin());
    let events = goblin_fight.take_turn(&mut player, CombatAction::Flee, &config, &mut rng);
    assert_eq!(events, vec![CombatEvent::FleeSucceeded]);
    assert_eq!(goblin_fight.phase(), CombatPhase::Fled);
    assert_eq!(player.exp(), 0);

    let mut dragon_fight = Encounter::new(bestiary::ancient_dragon());
    let events = dragon_fight.take_turn(&mut player, CombatAction::Flee, &config, &mut rng);
    assert_eq!(events[0], CombatEvent::FleeFailed);
    assert!(matches!(events[1], CombatEvent::EnemyAttack { .. }));
    assert_eq!(dragon_fight.phase(), CombatPhase::PlayerTurn);
}

#[test]
fn test_dragon_victory_unlocks_new_areas() {
    let config = BalanceConfig::default();
    let mut player = Player::new("Slayer");
    let mut dragon = bestiary::ancient_dragon();
    dragon.hp = 1;
    let mut encounter = Encounter::new(dragon);
    let mut rng = StepRng::new(0, 0);

    encounter.take_turn(&mut player, CombatAction::Attack, &config, &mut rng);

    let summary = encounter.summary();
    assert_eq!(summary.outcome, CombatPhase::Victory);
    assert!(summary.locations_unlocked.contains(&Location::MountainPass));
    assert!(summary.locations_unlocked.contains(&Location::DarkCave));
    assert!(player.can_travel_to(Location::DarkCave));
    assert!(player.find_item("Dragonbone Sword").is_some());
    assert!(summary.levels_gained >= 1);
}
