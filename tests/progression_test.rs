//! Integration test: quests, crafting and skills over a play session
//!
//! Kills go through real encounters, rewards come from quest turn-ins and
//! crafted gear is equipped, so the pieces are exercised together.

use epic_adventure::combat::bestiary;
use epic_adventure::combat::logic::{CombatAction, CombatPhase, Encounter};
use epic_adventure::core::config::BalanceConfig;
use epic_adventure::core::game_state::GameState;
use epic_adventure::items::catalog::{herbs, iron_ore};
use epic_adventure::progression::CraftError;
use epic_adventure::world::Location;
use rand::rngs::mock::StepRng;

fn fight_goblin(state: &mut GameState) {
    // A draw close to 1 keeps the loot table quiet
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut encounter = Encounter::new(bestiary::goblin());
    while !encounter.is_over() {
        encounter.take_turn(&mut state.player, CombatAction::Attack, &state.config, &mut rng);
    }
    assert_eq!(encounter.phase(), CombatPhase::Victory);
}

#[test]
fn test_goblin_menace_from_board_to_reward() {
    let mut state = GameState::new("Quester", BalanceConfig::default());
    assert!(state.player.start_quest("Goblin Menace"));

    for _ in 0..4 {
        fight_goblin(&mut state);
    }
    assert!(state.player.complete_quest("Goblin Menace").is_none());

    fight_goblin(&mut state);
    assert_eq!(state.player.level(), 2);
    assert_eq!(state.player.exp(), 25);

    let reward = state
        .player
        .complete_quest("Goblin Menace")
        .expect("five goblins finish the quest");
    assert_eq!(reward.exp, 100);
    assert_eq!(reward.gold, 50);
    assert_eq!(state.player.exp(), 125);
    assert_eq!(state.player.gold, 50 + 5 * 10 + 50);
    assert_eq!(state.player.reputation(), 5);
    assert_eq!(state.player.count_item("Iron Sword"), 1);

    // Turned-in quests are frozen
    fight_goblin(&mut state);
    assert!(state.player.complete_quest("Goblin Menace").is_none());
    assert_eq!(state.player.quests().completed.len(), 1);
    assert_eq!(state.player.reputation(), 5);
}

#[test]
fn test_herbalist_request_consumes_herbs() {
    let mut state = GameState::new("Gatherer", BalanceConfig::default());
    state.player.start_quest("Herbalist's Request");

    for _ in 0..9 {
        state.player.add_item(herbs());
    }
    assert!(!state.player.quests().active_quest("Herbalist's Request").unwrap().completed);

    state.player.add_item(herbs());
    assert!(state.player.quests().active_quest("Herbalist's Request").unwrap().completed);

    // Spending herbs elsewhere un-finishes it again
    let recipe = state.find_recipe("Small Health Potion").cloned().unwrap();
    recipe.craft(&mut state.player).unwrap();
    assert!(!state.player.quests().active_quest("Herbalist's Request").unwrap().completed);
    assert!(state.player.complete_quest("Herbalist's Request").is_none());

    for _ in 0..3 {
        state.player.add_item(herbs());
    }
    let reward = state.player.complete_quest("Herbalist's Request").unwrap();
    assert_eq!(reward.gold, 75);
    assert_eq!(state.player.gold, 50 + 75);
    assert_eq!(state.player.count_item("Herbs"), 0);
    assert!(state.player.quests().active.is_empty());
    assert_eq!(state.player.quests().completed.len(), 1);
    assert!(state.player.complete_quest("Herbalist's Request").is_none());
    assert_eq!(state.player.count_item("Medium Health Potion"), 1);
}

#[test]
fn test_blacksmithing_unlocks_iron_sword() {
    let mut state = GameState::new("Smith", BalanceConfig::default());
    let recipe = state.find_recipe("Iron Sword").cloned().unwrap();

    assert_eq!(
        recipe.craft(&mut state.player),
        Err(CraftError::MissingMaterial {
            material: "Iron Ore".to_string(),
            needed: 2,
            held: 0
        })
    );

    state.player.add_item(iron_ore());
    state.player.add_item(iron_ore());
    assert!(matches!(
        recipe.craft(&mut state.player),
        Err(CraftError::SkillTooLow { .. })
    ));
    assert_eq!(state.player.count_item("Iron Ore"), 2);

    assert!(state.player.upgrade_skill("Blacksmithing"));
    let sword = recipe.craft(&mut state.player).unwrap();
    assert_eq!(state.player.count_item("Iron Ore"), 0);

    let attack_before = state.player.attack();
    assert!(state.player.equip_item(&sword));
    assert_eq!(state.player.attack(), attack_before - 2 + 5);
}

#[test]
fn test_skill_gates_follow_level() {
    let mut state = GameState::new("Student", BalanceConfig::default());
    assert!(!state.player.upgrade_skill("Dual Wielding"));

    state.player.add_exp(10_000);
    assert!(state.player.level() >= 5);
    // The parent skill must be mastered first
    assert!(!state.player.upgrade_skill("Dual Wielding"));
    for _ in 0..5 {
        assert!(state.player.upgrade_skill("Sword Mastery"));
    }
    assert!(!state.player.upgrade_skill("Sword Mastery"));
    assert!(state.player.upgrade_skill("Dual Wielding"));
    assert!(!state.player.upgrade_skill("Dual Wielding"));

    let defense_before = state.player.defense();
    assert!(state.player.upgrade_skill("Heavy Armor"));
    assert_eq!(state.player.defense(), defense_before + 3);
}

#[test]
fn test_reaching_level_ten_opens_dragons_keep() {
    let mut state = GameState::new("Veteran", BalanceConfig::default());
    assert!(!state.player.travel_to(Location::DragonsKeep));

    state.player.add_exp(1_000_000);
    assert!(state.player.level() >= 10);
    assert!(state.player.exp() < state.player.exp_to_level());
    assert_eq!(state.player.hp, state.player.max_hp());
    assert!(state.player.travel_to(Location::DragonsKeep));
}
