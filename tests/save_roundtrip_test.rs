//! Integration test: play, save, load, keep playing
//!
//! A seeded session is saved through the binary format and the JSON export,
//! and both copies must come back as the same character.

use epic_adventure::character::SaveManager;
use epic_adventure::core::config::BalanceConfig;
use epic_adventure::core::error::GameError;
use epic_adventure::core::game_logic::{auto_battle, explore, ExploreOutcome};
use epic_adventure::core::game_state::GameState;
use epic_adventure::utils::persistence::{export_player, import_player};
use epic_adventure::world::Location;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("epic-adventure-it-{}-{}", tag, std::process::id()))
}

fn played_session(seed: u64) -> GameState {
    let mut state = GameState::new("Roundtrip Hero", BalanceConfig::default());
    state.player.start_quest("Goblin Menace");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..60 {
        state.advance_time(25.0, &mut rng);
        if state.player.location().is_safe() || state.player.hp * 2 < state.player.max_hp() {
            state.player.heal_to_full();
            state.player.travel_to(Location::StartingForest);
        }
        if let Ok(ExploreOutcome::Encounter(_)) = explore(&mut state, &mut rng) {
            auto_battle(&mut state, &mut rng);
        }
    }
    state.player.upgrade_skill("Heavy Armor");
    state
}

#[test]
fn test_binary_save_roundtrip_after_play() {
    let dir = temp_dir("binary");
    let manager = SaveManager::at_path(dir.join("save.dat"));
    let state = played_session(5);
    let original = &state.player;
    assert!(original.level() > 1);

    manager.save(original).expect("save succeeds");
    let loaded = manager.load().expect("load succeeds");

    assert_eq!(loaded.id, original.id);
    assert_eq!(loaded.name, original.name);
    assert_eq!(loaded.level(), original.level());
    assert_eq!(loaded.exp(), original.exp());
    assert_eq!(loaded.hp, original.hp);
    assert_eq!(loaded.max_hp(), original.max_hp());
    assert_eq!(loaded.attack(), original.attack());
    assert_eq!(loaded.defense(), original.defense());
    assert_eq!(loaded.gold, original.gold);
    assert_eq!(loaded.reputation(), original.reputation());
    assert_eq!(loaded.inventory(), original.inventory());
    assert_eq!(loaded.equipped_weapon(), original.equipped_weapon());
    assert_eq!(loaded.equipped_armor(), original.equipped_armor());
    assert_eq!(loaded.location(), original.location());
    assert_eq!(
        loaded.unlocked_locations().collect::<Vec<_>>(),
        original.unlocked_locations().collect::<Vec<_>>()
    );
    assert_eq!(loaded.clock.day_count, original.clock.day_count);
    assert_eq!(loaded.weather(), original.weather());
    assert_eq!(
        loaded.skills().level_of("Heavy Armor"),
        original.skills().level_of("Heavy Armor")
    );

    let kills = |p: &epic_adventure::character::Player| {
        p.quests()
            .iter()
            .find(|q| q.title == "Goblin Menace")
            .map(|q| (q.kills["Goblin"].current, q.completed, q.turned_in))
    };
    assert_eq!(kills(&loaded), kills(original));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_loaded_character_keeps_playing() {
    let dir = temp_dir("resume");
    let manager = SaveManager::at_path(dir.join("save.dat"));
    let state = played_session(8);
    manager.save(&state.player).unwrap();

    let mut resumed = GameState::from_player(manager.load().unwrap(), BalanceConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    resumed.player.heal_to_full();
    resumed.player.travel_to(Location::StartingForest);
    let mut fought = false;
    for _ in 0..20 {
        if let Ok(ExploreOutcome::Encounter(_)) = explore(&mut resumed, &mut rng) {
            let summary = auto_battle(&mut resumed, &mut rng).unwrap();
            assert!(summary.outcome.is_terminal());
            fought = true;
            break;
        }
    }
    assert!(fought);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_json_export_matches_binary_save() {
    let dir = temp_dir("json");
    let manager = SaveManager::at_path(dir.join("save.dat"));
    let state = played_session(13);

    manager.save(&state.player).unwrap();
    export_player(&dir.join("hero.json"), &state.player).unwrap();

    let from_binary = manager.load().unwrap();
    let from_json = import_player(&dir.join("hero.json")).unwrap();
    assert_eq!(from_json.id, from_binary.id);
    assert_eq!(from_json.level(), from_binary.level());
    assert_eq!(from_json.gold, from_binary.gold);
    assert_eq!(from_json.inventory(), from_binary.inventory());
    assert_eq!(from_json.attack(), from_binary.attack());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn test_tampered_save_is_rejected() {
    let dir = temp_dir("tamper");
    let manager = SaveManager::at_path(dir.join("save.dat"));
    let state = played_session(21);
    manager.save(&state.player).unwrap();

    let mut bytes = fs::read(manager.path()).unwrap();
    // Flip a byte inside the payload, past the magic and length header
    bytes[20] ^= 0xFF;
    fs::write(manager.path(), &bytes).unwrap();

    assert!(matches!(manager.load(), Err(GameError::ChecksumMismatch)));
    fs::remove_dir_all(dir).ok();
}
