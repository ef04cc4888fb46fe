//! Item system: types, equipment, the authored catalog, and loot tables.

pub mod catalog;
pub mod equipment;
pub mod loot;
pub mod types;

pub use equipment::*;
pub use loot::*;
pub use types::*;
