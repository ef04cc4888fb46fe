//! The player character, inventory, skills, and persistence.

#![allow(unused_imports)]

pub mod inventory;
pub mod player;
pub mod save;
pub mod skills;

pub use inventory::*;
pub use player::*;
pub use save::*;
pub use skills::*;
