use super::inventory::Inventory;
use super::player::Player;
use super::skills::{Skill, SkillId, SkillStat, SkillTree};
use crate::core::constants::{SAVE_FILE_NAME, SAVE_VERSION_MAGIC};
use crate::core::error::{GameError, Result};
use crate::items::{Equipment, EquipmentSlot, Item, ItemCategory, ItemKind};
use crate::progression::quests::{ItemRequirement, KillProgress, Quest, QuestLog, QuestReward};
use crate::world::{Location, TimeOfDay, Weather, WorldClock};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Flat item form: category tag plus the single stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub category: ItemCategory,
    pub stat: u32,
    pub value: u32,
    pub description: String,
    #[serde(default)]
    pub materials: BTreeMap<String, u32>,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        let materials = match &item.kind {
            ItemKind::Recipe { materials } => materials.clone(),
            _ => BTreeMap::new(),
        };
        Self {
            name: item.name.clone(),
            category: item.category(),
            stat: item.stat(),
            value: item.value,
            description: item.description.clone(),
            materials,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let kind = ItemKind::from_parts(record.category, record.stat, record.materials);
        Item::new(&record.name, kind, record.value, &record.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRecord {
    pub title: String,
    pub description: String,
    pub objective: String,
    pub reward_exp: u64,
    pub reward_gold: u32,
    pub reward_items: Vec<ItemRecord>,
    pub required_item: Option<ItemRequirement>,
    pub required_kills: BTreeMap<String, u32>,
    pub current_kills: BTreeMap<String, u32>,
    pub completed: bool,
    pub turned_in: bool,
}

impl From<&Quest> for QuestRecord {
    fn from(quest: &Quest) -> Self {
        Self {
            title: quest.title.clone(),
            description: quest.description.clone(),
            objective: quest.objective.clone(),
            reward_exp: quest.reward.exp,
            reward_gold: quest.reward.gold,
            reward_items: quest.reward.items.iter().map(ItemRecord::from).collect(),
            required_item: quest.required_item.clone(),
            required_kills: quest
                .kills
                .iter()
                .map(|(enemy, progress)| (enemy.clone(), progress.required))
                .collect(),
            current_kills: quest
                .kills
                .iter()
                .map(|(enemy, progress)| (enemy.clone(), progress.current))
                .collect(),
            completed: quest.completed,
            turned_in: quest.turned_in,
        }
    }
}

impl From<QuestRecord> for Quest {
    fn from(record: QuestRecord) -> Self {
        let kills = record
            .required_kills
            .iter()
            .map(|(enemy, &required)| {
                let current = record.current_kills.get(enemy).copied().unwrap_or(0);
                (
                    enemy.clone(),
                    KillProgress {
                        required,
                        current: current.min(required),
                    },
                )
            })
            .collect();
        Quest {
            title: record.title,
            description: record.description,
            objective: record.objective,
            reward: QuestReward {
                exp: record.reward_exp,
                gold: record.reward_gold,
                items: record.reward_items.into_iter().map(Item::from).collect(),
            },
            required_item: record.required_item,
            kills,
            completed: record.completed,
            turned_in: record.turned_in,
        }
    }
}

/// Skill with its parent stored by name; links are rebuilt after every
/// skill exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub description: String,
    pub max_level: u32,
    pub current_level: u32,
    pub stat_effects: BTreeMap<SkillStat, u32>,
    pub required_level: u32,
    pub parent: Option<String>,
}

/// Everything needed to rebuild a `Player`.
///
/// IMPORTANT: new fields need `#[serde(default)]` so older JSON exports
/// still import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub exp: u64,
    pub exp_to_level: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub gold: u32,
    pub inventory: Vec<ItemRecord>,
    pub equipped_weapon: Option<String>,
    pub equipped_armor: Option<String>,
    pub location: Location,
    pub unlocked_locations: Vec<Location>,
    pub available_quests: Vec<QuestRecord>,
    pub active_quests: Vec<QuestRecord>,
    pub completed_quests: Vec<QuestRecord>,
    pub skills: Vec<SkillRecord>,
    pub reputation: i32,
    pub play_time_seconds: f64,
    pub day_count: u32,
    pub weather: Weather,
    pub time_of_day: TimeOfDay,
    /// Unix timestamp of the save.
    pub saved_at: i64,
}

impl SaveRecord {
    pub fn from_player(player: &Player) -> Self {
        let skills = player
            .skills
            .iter()
            .enumerate()
            .map(|(index, skill)| SkillRecord {
                name: skill.name.clone(),
                description: skill.description.clone(),
                max_level: skill.max_level,
                current_level: skill.current_level,
                stat_effects: skill.stat_effects.clone(),
                required_level: skill.required_level,
                parent: player
                    .skills
                    .parent_of(SkillId(index))
                    .map(|parent| parent.name.clone()),
            })
            .collect();

        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            level: player.level,
            exp: player.exp,
            exp_to_level: player.exp_to_level,
            hp: player.hp,
            max_hp: player.max_hp,
            base_attack: player.base_attack,
            base_defense: player.base_defense,
            gold: player.gold,
            inventory: player.inventory.items().iter().map(ItemRecord::from).collect(),
            equipped_weapon: player.equipment.weapon.as_ref().map(|i| i.name.clone()),
            equipped_armor: player.equipment.armor.as_ref().map(|i| i.name.clone()),
            location: player.location,
            unlocked_locations: player.unlocked.iter().copied().collect(),
            available_quests: player.quests.available.iter().map(QuestRecord::from).collect(),
            active_quests: player.quests.active.iter().map(QuestRecord::from).collect(),
            completed_quests: player.quests.completed.iter().map(QuestRecord::from).collect(),
            skills,
            reputation: player.reputation,
            play_time_seconds: player.clock.play_time_seconds,
            day_count: player.clock.day_count,
            weather: player.clock.weather,
            time_of_day: player.clock.time_of_day,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Rebuilds a player. Equipped items are looked up by name in the
    /// rebuilt inventory; skill parents are linked in a second pass.
    pub fn into_player(self) -> Result<Player> {
        if self.level == 0 || self.exp_to_level == 0 || self.max_hp == 0 {
            return Err(GameError::InvalidSave {
                reason: "level, exp threshold and max hp must be positive".to_string(),
            });
        }
        if let Some(skill) = self.skills.iter().find(|s| s.current_level > s.max_level) {
            return Err(GameError::InvalidSave {
                reason: format!("skill '{}' is above its max level", skill.name),
            });
        }

        let mut inventory = Inventory::new();
        for record in self.inventory {
            inventory.add(Item::from(record));
        }

        let mut equipment = Equipment::new();
        for (slot, name) in [
            (EquipmentSlot::Weapon, &self.equipped_weapon),
            (EquipmentSlot::Armor, &self.equipped_armor),
        ] {
            let Some(name) = name else { continue };
            let found = inventory
                .items()
                .iter()
                .find(|item| item.name == *name && EquipmentSlot::for_item(item) == Some(slot))
                .cloned();
            match found {
                Some(item) => {
                    equipment.set(slot, Some(item));
                }
                None => tracing::warn!("Equipped item '{}' missing from inventory", name),
            }
        }

        let mut skills = SkillTree::new();
        for record in &self.skills {
            let mut skill = Skill::new(&record.name, &record.description, record.max_level);
            skill.current_level = record.current_level;
            skill.stat_effects = record.stat_effects.clone();
            skill.required_level = record.required_level;
            skills.add(skill);
        }
        for record in &self.skills {
            let Some(parent_name) = &record.parent else { continue };
            let linked = match (skills.find(&record.name), skills.find(parent_name)) {
                (Some(child), Some(parent)) => skills.set_parent(child, parent),
                _ => false,
            };
            if !linked {
                tracing::warn!("Dropped parent link {} -> {}", record.name, parent_name);
            }
        }

        let quests = QuestLog {
            available: self.available_quests.into_iter().map(Quest::from).collect(),
            active: self.active_quests.into_iter().map(Quest::from).collect(),
            completed: self.completed_quests.into_iter().map(Quest::from).collect(),
        };

        let mut unlocked: std::collections::BTreeSet<Location> =
            self.unlocked_locations.into_iter().collect();
        unlocked.insert(Location::SAFE_HAVEN);
        unlocked.insert(self.location);

        Ok(Player {
            id: self.id,
            name: self.name,
            level: self.level,
            exp: self.exp,
            exp_to_level: self.exp_to_level,
            hp: self.hp.min(self.max_hp),
            max_hp: self.max_hp,
            base_attack: self.base_attack,
            base_defense: self.base_defense,
            gold: self.gold,
            inventory,
            equipment,
            location: self.location,
            unlocked,
            quests,
            skills,
            reputation: self.reputation,
            clock: WorldClock {
                play_time_seconds: self.play_time_seconds.max(0.0),
                weather: self.weather,
                time_of_day: self.time_of_day,
                day_count: self.day_count.max(1),
            },
        })
    }
}

/// Manages saving and loading characters with a checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Sets up the save directory at the platform config location.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("", "", "epic-adventure").ok_or(GameError::NoSaveDirectory)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit save file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Saves the player to disk.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized save record (variable length)
    /// - SHA256 checksum (32 bytes)
    pub fn save(&self, player: &Player) -> Result<()> {
        let record = SaveRecord::from_player(player);
        let data = bincode::serialize(&record)?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        tracing::info!("Saved {} to {}", player.name, self.save_path.display());
        Ok(())
    }

    /// Loads and verifies a save. Returns an error if the file is missing,
    /// the magic is wrong, the checksum fails, or the record is invalid.
    pub fn load(&self) -> Result<Player> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            tracing::warn!("Rejected save with magic 0x{:016X}", version);
            return Err(GameError::InvalidSave {
                reason: format!(
                    "expected magic 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, version
                ),
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        // magic + length + payload + checksum must fit in the file
        let file_len = file.metadata()?.len();
        if u64::from(data_len) + 8 + 4 + 32 > file_len {
            return Err(GameError::InvalidSave {
                reason: format!(
                    "payload length {} exceeds file size {}",
                    data_len, file_len
                ),
            });
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            tracing::warn!("Rejected save {}: checksum mismatch", self.save_path.display());
            return Err(GameError::ChecksumMismatch);
        }

        let record: SaveRecord = bincode::deserialize(&data)?;
        let player = record.into_player()?;
        tracing::info!("Loaded {} from {}", player.name, self.save_path.display());
        Ok(player)
    }
}
