//! Enemies, the bestiary, and the turn-based encounter state machine.

#![allow(unused_imports)]

pub mod bestiary;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
