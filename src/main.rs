//! Epic Adventure - line-based front end.
//!
//! Reads one command per line from stdin and drives the library core.
//! Type `help` in game for the command list.

use epic_adventure::character::{Player, SaveManager};
use epic_adventure::combat::logic::{CombatAction, CombatPhase, EncounterSummary};
use epic_adventure::core::config::BalanceConfig;
use epic_adventure::core::game_logic::{auto_battle, combat_turn, explore, ExploreOutcome};
use epic_adventure::core::game_state::GameState;
use epic_adventure::town::shop;
use epic_adventure::utils::persistence::{export_player, import_player};
use epic_adventure::world::Location;
use rand::rngs::ThreadRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "balance.toml";

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("epic-adventure {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Epic Adventure - turn-based RPG\n");
                println!("Usage: epic-adventure [--config <balance.toml>]\n");
                println!("Options:");
                println!("  --config   Balance overrides (default: ./balance.toml)");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                return Ok(());
            }
            "--config" | "-c" if i + 1 < args.len() => {
                config_path = PathBuf::from(&args[i + 1]);
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'epic-adventure --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("epic_adventure=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BalanceConfig::load_or_default(&config_path);
    let save_manager = match SaveManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            tracing::warn!("Saving disabled: {}", e);
            None
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut rng = rand::thread_rng();

    let mut state = match save_manager.as_ref().filter(|m| m.save_exists()) {
        Some(manager) => match manager.load() {
            Ok(player) => {
                println!("Welcome back, {}!", player.name);
                GameState::from_player(player, config)
            }
            Err(e) => {
                println!("Could not load your save ({}). Starting fresh.", e);
                new_game(&mut lines, config)?
            }
        },
        None => new_game(&mut lines, config)?,
    };

    println!("Type 'help' for commands.");
    let mut last_tick = Instant::now();
    loop {
        prompt(&state)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let elapsed = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        if let Some(weather) = state.advance_time(elapsed, &mut rng) {
            println!("The weather turns: {}.", weather.name());
        }

        match run_command(&mut state, line.trim(), save_manager.as_ref(), &mut rng) {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    if let Some(manager) = &save_manager {
        if let Err(e) = manager.save(&state.player) {
            eprintln!("Failed to save on exit: {}", e);
        }
    }
    println!("Farewell, {}.", state.player.name);
    Ok(())
}

fn new_game(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    config: BalanceConfig,
) -> io::Result<GameState> {
    print!("Name your hero: ");
    io::stdout().flush()?;
    let name = lines
        .next()
        .transpose()?
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Hero".to_string());
    println!("{} sets out from the {}.", name, Location::START);
    Ok(GameState::new(&name, config))
}

fn prompt(state: &GameState) -> io::Result<()> {
    let player = &state.player;
    if let Some(encounter) = &state.encounter {
        print!(
            "[{} HP {}/{}] vs {} (HP {}/{}) > ",
            player.name,
            player.hp,
            player.max_hp(),
            encounter.enemy.name,
            encounter.enemy.hp,
            encounter.enemy.max_hp
        );
    } else {
        print!(
            "[{} L{} HP {}/{} {}g @ {}] > ",
            player.name,
            player.level(),
            player.hp,
            player.max_hp(),
            player.gold,
            player.location()
        );
    }
    io::stdout().flush()
}

enum Flow {
    Continue,
    Quit,
}

fn run_command(
    state: &mut GameState,
    line: &str,
    save_manager: Option<&SaveManager>,
    rng: &mut ThreadRng,
) -> Flow {
    let (command, arg) = match line.split_once(' ') {
        Some((c, a)) => (c.to_lowercase(), a.trim()),
        None => (line.to_lowercase(), ""),
    };

    if state.in_combat() {
        let action = match command.as_str() {
            "attack" | "a" => Some(CombatAction::Attack),
            "defend" | "d" => Some(CombatAction::Defend),
            "potion" | "p" => Some(CombatAction::UseItem),
            "flee" | "f" => Some(CombatAction::Flee),
            "auto" => {
                if let Some(summary) = auto_battle(state, rng) {
                    print_summary(&summary);
                }
                return Flow::Continue;
            }
            "quit" => return Flow::Quit,
            _ => None,
        };
        match action {
            Some(action) => fight_round(state, action, rng),
            None => println!("You are in a fight: attack, defend, potion, flee or auto."),
        }
        return Flow::Continue;
    }

    match command.as_str() {
        "" => {}
        "help" => print_help(),
        "status" | "s" => print_status(&state.player),
        "explore" | "e" => match explore(state, rng) {
            Ok(ExploreOutcome::Encounter(enemy)) => {
                let tag = if enemy.is_boss { " (BOSS)" } else { "" };
                println!(
                    "A level {} {}{} appears! HP {} ATK {} DEF {}",
                    enemy.level, enemy.name, tag, enemy.max_hp, enemy.attack, enemy.defense
                );
            }
            Ok(ExploreOutcome::Treasure { gold, item }) => {
                println!("You found a chest with {} gold!", gold);
                if let Some(item) = item {
                    println!("Inside is also a {}.", item.name);
                }
            }
            Ok(ExploreOutcome::Gathered(item)) => println!("You gathered {}.", item.name),
            Err(e) => println!("{}", e),
        },
        "travel" | "t" => match Location::from_name(arg) {
            Some(location) if state.player.travel_to(location) => {
                println!("You travel to {}. {}", location, location.description());
            }
            Some(location) => println!("The way to {} is still closed.", location),
            None => {
                let open: Vec<String> = state
                    .player
                    .unlocked_locations()
                    .map(|l| l.to_string())
                    .collect();
                println!("Where to? Open roads: {}", open.join(", "));
            }
        },
        "inventory" | "i" => print_inventory(&state.player),
        "equip" => match state.player.find_item(arg).cloned() {
            Some(item) if state.player.equip_item(&item) => println!("Equipped {}.", item.name),
            _ => println!("You can't equip that."),
        },
        "use" => match state.player.find_item(arg).cloned() {
            Some(item) if state.player.use_item(&item) => {
                println!("You use {}. HP {}/{}", item.name, state.player.hp, state.player.max_hp())
            }
            _ => println!("You can't use that."),
        },
        "quests" | "q" => print_quests(&state.player),
        "accept" => {
            if state.player.start_quest(arg) {
                println!("Quest accepted: {}", arg);
            } else {
                println!("No such quest on the board.");
            }
        }
        "turnin" => match state.player.complete_quest(arg) {
            Some(reward) => println!(
                "Quest complete! +{} EXP, +{} gold, {} item(s)",
                reward.exp,
                reward.gold,
                reward.items.len()
            ),
            None => println!("That quest isn't ready to turn in."),
        },
        "skills" => {
            for skill in state.player.skills().iter() {
                let effects: Vec<String> = skill
                    .stat_effects
                    .iter()
                    .map(|(stat, per_level)| format!("+{} {}", per_level, stat.name()))
                    .collect();
                println!(
                    "  {} {}/{} (needs level {}) [{} per level] - {}",
                    skill.name,
                    skill.current_level,
                    skill.max_level,
                    skill.required_level,
                    effects.join(", "),
                    skill.description
                );
            }
        }
        "upgrade" => {
            if state.player.upgrade_skill(arg) {
                println!("{} is now level {}.", arg, state.player.skills().level_of(arg));
            } else {
                println!("You can't upgrade that right now.");
            }
        }
        "recipes" => {
            for recipe in &state.recipes {
                let materials: Vec<String> = recipe
                    .materials
                    .iter()
                    .map(|(name, qty)| format!("{} x{}", name, qty))
                    .collect();
                let ready = if recipe.can_craft(&state.player) { "*" } else { " " };
                println!("  {} {} <- {}", ready, recipe.name, materials.join(", "));
            }
        }
        "craft" => match state.find_recipe(arg).cloned() {
            Some(recipe) => match recipe.craft(&mut state.player) {
                Ok(item) => println!("You crafted {}.", item.name),
                Err(e) => println!("Can't craft: {}", e),
            },
            None => println!("No such recipe."),
        },
        "shop" => {
            for item in shop::stock() {
                println!("  {:<22} {:>4}g  {}", item.name, item.value, item.stat_label());
            }
        }
        "buy" => match shop::buy(&mut state.player, arg) {
            Ok(item) => println!("Bought {} for {}g.", item.name, item.value),
            Err(e) => println!("{}", e),
        },
        "sell" => match shop::sell(&mut state.player, arg, &state.config) {
            Ok(price) => println!("Sold for {}g.", price),
            Err(e) => println!("{}", e),
        },
        "heal" => match shop::heal(&mut state.player, &state.config) {
            Ok(cost) => println!("The healer restores you for {}g.", cost),
            Err(e) => println!("{}", e),
        },
        "save" => match save_manager {
            Some(manager) => match manager.save(&state.player) {
                Ok(()) => println!("Game saved."),
                Err(e) => println!("Save failed: {}", e),
            },
            None => println!("Saving is unavailable on this system."),
        },
        "load" => match save_manager.map(SaveManager::load) {
            Some(Ok(player)) => {
                replace_player(state, player);
                println!("Game loaded.");
            }
            Some(Err(e)) => println!("Load failed: {}", e),
            None => println!("Saving is unavailable on this system."),
        },
        "export" if !arg.is_empty() => match export_player(Path::new(arg), &state.player) {
            Ok(()) => println!("Exported to {}.", arg),
            Err(e) => println!("Export failed: {}", e),
        },
        "import" if !arg.is_empty() => match import_player(Path::new(arg)) {
            Ok(player) => {
                replace_player(state, player);
                println!("Imported {}.", state.player.name);
            }
            Err(e) => println!("Import failed: {}", e),
        },
        "quit" | "exit" => return Flow::Quit,
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }
    Flow::Continue
}

fn replace_player(state: &mut GameState, player: Player) {
    state.player = player;
    state.encounter = None;
}

fn fight_round(state: &mut GameState, action: CombatAction, rng: &mut ThreadRng) {
    let Some(report) = combat_turn(state, action, rng) else {
        return;
    };
    for entry in &report.log {
        let marker = if entry.is_player_action { ">" } else { "<" };
        println!("{} {}", marker, entry.message);
    }
    if let Some(summary) = report.finished {
        print_summary(&summary);
    }
}

fn print_summary(summary: &EncounterSummary) {
    match summary.outcome {
        CombatPhase::Victory => {
            println!(
                "Victory over the {} in {} rounds! +{} EXP, +{} gold",
                summary.enemy_name, summary.rounds, summary.exp_gained, summary.gold_gained
            );
            for item in &summary.loot {
                println!("  Loot: {}", item.name);
            }
            if summary.levels_gained > 0 {
                println!("  You gained {} level(s)!", summary.levels_gained);
            }
            for location in &summary.locations_unlocked {
                println!("  New area unlocked: {}", location);
            }
        }
        CombatPhase::Defeat => println!(
            "You were defeated by the {} and wake in town, {} gold lighter.",
            summary.enemy_name, summary.gold_lost
        ),
        CombatPhase::Fled => println!("You escaped from the {}.", summary.enemy_name),
        CombatPhase::PlayerTurn | CombatPhase::EnemyTurn => {}
    }
}

fn print_status(player: &Player) {
    println!("{} - Level {}", player.name, player.level());
    println!(
        "  HP {}/{}  EXP {}/{}",
        player.hp,
        player.max_hp(),
        player.exp(),
        player.exp_to_level()
    );
    println!(
        "  ATK {}  DEF {}  Weather resist {}%",
        player.attack(),
        player.defense(),
        player.weather_resistance()
    );
    println!("  Gold {}  Reputation {}", player.gold, player.reputation());
    println!(
        "  {} - day {}, {}, {}",
        player.location(),
        player.clock.day_count,
        player.clock.time_of_day.name(),
        player.weather().name()
    );
}

fn print_inventory(player: &Player) {
    if player.inventory().is_empty() {
        println!("Your pack is empty.");
        return;
    }
    for item in player.inventory() {
        let equipped = if player.is_equipped(item) { " (equipped)" } else { "" };
        println!("  {:<22} {}{}", item.name, item.stat_label(), equipped);
    }
}

fn print_quests(player: &Player) {
    let log = player.quests();
    for quest in &log.active {
        let state = if quest.completed { "ready" } else { "active" };
        println!("  [{}] {} - {}", state, quest.title, quest.objective);
    }
    for quest in &log.available {
        println!("  [board] {} - {}", quest.title, quest.objective);
    }
    for quest in &log.completed {
        println!("  [done] {}", quest.title);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  status | inventory | quests | skills | recipes | shop");
    println!("  explore | travel <place> | equip <item> | use <item>");
    println!("  accept <quest> | turnin <quest> | upgrade <skill> | craft <recipe>");
    println!("  buy <item> | sell <item> | heal        (in town)");
    println!("  save | load | export <file> | import <file> | quit");
    println!("In a fight: attack | defend | potion | flee | auto");
}
