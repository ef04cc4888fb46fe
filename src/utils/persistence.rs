//! JSON export/import of save records.
//!
//! The binary save in `character::save` is what the game loads on start;
//! these helpers produce a readable copy that can be inspected, edited,
//! or moved between machines.

use crate::character::{Player, SaveRecord};
use crate::core::error::Result;
use std::fs;
use std::path::Path;

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a JSON file.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Load a JSON file, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    load_json(path).unwrap_or_default()
}

pub fn export_player(path: &Path, player: &Player) -> Result<()> {
    save_json(path, &SaveRecord::from_player(player))?;
    tracing::info!("Exported {} to {}", player.name, path.display());
    Ok(())
}

pub fn import_player(path: &Path) -> Result<Player> {
    let record: SaveRecord = load_json(path)?;
    record.into_player()
}
