//! Integration test: the world clock and how weather feeds into combat

use epic_adventure::combat::bestiary;
use epic_adventure::combat::logic::{CombatAction, CombatEvent, Encounter};
use epic_adventure::core::config::BalanceConfig;
use epic_adventure::core::game_state::GameState;
use epic_adventure::world::{TimeOfDay, Weather};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn calm_config() -> BalanceConfig {
    BalanceConfig {
        weather_change_chance: 0.0,
        ..BalanceConfig::default()
    }
}

#[test]
fn test_full_day_cycle() {
    let mut state = GameState::new("Watcher", calm_config());
    let mut rng = StepRng::new(0, 0);

    let mut seen = Vec::new();
    for delta in [30.0, 90.0, 150.0, 130.0, 200.0] {
        assert_eq!(state.advance_time(delta, &mut rng), None);
        seen.push((state.player.clock.time_of_day, state.player.clock.day_count));
    }

    assert_eq!(
        seen,
        vec![
            (TimeOfDay::Dawn, 1),
            (TimeOfDay::Day, 1),
            (TimeOfDay::Dusk, 1),
            (TimeOfDay::Night, 1),
            (TimeOfDay::Dawn, 2),
        ]
    );
    assert_eq!(state.player.weather(), Weather::Clear);
}

#[test]
fn test_long_absence_counts_days() {
    let mut state = GameState::new("Sleeper", calm_config());
    let mut rng = StepRng::new(0, 0);
    state.advance_time(600.0 * 3.0 + 1.0, &mut rng);
    assert_eq!(state.player.clock.day_count, 4);
    assert_eq!(state.player.clock.time_of_day, TimeOfDay::Dawn);

    // Non-positive or non-finite deltas change nothing
    let before = state.player.clock.clone();
    state.advance_time(-5.0, &mut rng);
    state.advance_time(f64::NAN, &mut rng);
    assert_eq!(state.player.clock, before);
}

#[test]
fn test_restless_sky_eventually_changes() {
    let config = BalanceConfig {
        weather_change_chance: 1.0,
        ..BalanceConfig::default()
    };
    let mut state = GameState::new("Forecaster", config);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        state.advance_time(10.0, &mut rng);
        seen.insert(state.player.weather());
    }
    assert!(seen.contains(&Weather::Clear));
    assert!(seen.len() >= 3);
}

fn first_hit_taken(weather: Weather) -> u32 {
    let config = BalanceConfig::default();
    let mut state = GameState::new("Tester", config);
    state.player.clock.weather = weather;
    let mut encounter = Encounter::new(bestiary::orc_warrior());
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut events =
        encounter.take_turn(&mut state.player, CombatAction::Defend, &state.config, &mut rng);
    events.extend(encounter.take_turn(
        &mut state.player,
        CombatAction::Attack,
        &state.config,
        &mut rng,
    ));
    events
        .into_iter()
        .find_map(|event| match event {
            CombatEvent::EnemyAttack {
                damage,
                defended: false,
            } => Some(damage),
            _ => None,
        })
        .unwrap_or(0)
}

#[test]
fn test_sandstorm_hurts_more_than_clear_skies() {
    // Clear: 20 attack - 8/2 = 16 raw, minus 8 defense
    assert_eq!(first_hit_taken(Weather::Clear), 8);
    // Sandstorm: orc attack x1.1 = 22, raw 18, minus 8 x 0.8 defense
    assert_eq!(first_hit_taken(Weather::Sandstorm), 11);
}

#[test]
fn test_snow_toughens_enemies() {
    let config = BalanceConfig::default();
    let mut rng = StepRng::new(u64::MAX, 0);

    let mut damage_in = |weather: Weather| {
        let mut state = GameState::new("Tester", config.clone());
        state.player.clock.weather = weather;
        let mut encounter = Encounter::new(bestiary::goblin());
        encounter
            .take_turn(&mut state.player, CombatAction::Attack, &state.config, &mut rng)
            .into_iter()
            .find_map(|event| match event {
                CombatEvent::PlayerAttack { damage } => Some(damage),
                _ => None,
            })
    };

    assert_eq!(damage_in(Weather::Clear), Some(9));
    // Goblin defense 2 x 1.1 in snow
    assert_eq!(damage_in(Weather::Snow), Some(8));
}
