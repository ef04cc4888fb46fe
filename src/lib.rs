//! Epic Adventure - turn-based RPG core library
//!
//! Characters, enemies, items, quests, skills, crafting, the world clock and
//! the combat state machine. Front ends (the text binary, the balance
//! simulator, tests) drive everything through this crate.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod progression;
pub mod simulator;
pub mod town;
pub mod utils;
pub mod world;
