//! Core game state, balance configuration, and errors.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod error;
pub mod game_logic;
pub mod game_state;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game_logic::*;
pub use game_state::*;
