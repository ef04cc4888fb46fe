use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    #[serde(rename = "Starting Forest")]
    StartingForest,
    #[serde(rename = "Greenfield Town")]
    GreenfieldTown,
    #[serde(rename = "Dark Cave")]
    DarkCave,
    #[serde(rename = "Mountain Pass")]
    MountainPass,
    #[serde(rename = "Dragon's Keep")]
    DragonsKeep,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::StartingForest,
        Location::GreenfieldTown,
        Location::DarkCave,
        Location::MountainPass,
        Location::DragonsKeep,
    ];

    /// Where a new character begins.
    pub const START: Location = Location::StartingForest;

    /// Where a defeated character wakes up.
    pub const SAFE_HAVEN: Location = Location::GreenfieldTown;

    pub fn name(&self) -> &'static str {
        match self {
            Location::StartingForest => "Starting Forest",
            Location::GreenfieldTown => "Greenfield Town",
            Location::DarkCave => "Dark Cave",
            Location::MountainPass => "Mountain Pass",
            Location::DragonsKeep => "Dragon's Keep",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Location::StartingForest => "A peaceful forest where your journey begins.",
            Location::GreenfieldTown => "A bustling town with shops and friendly folk.",
            Location::DarkCave => "A dark, damp cave. Dangerous creatures lurk within.",
            Location::MountainPass => "A treacherous path through the mountains.",
            Location::DragonsKeep => "The lair of the ancient dragon. Only the brave dare enter.",
        }
    }

    /// Towns have services but no monsters.
    pub fn is_safe(&self) -> bool {
        matches!(self, Location::GreenfieldTown)
    }

    /// Locations opened up by slaying a boss.
    pub fn unlocked_by_boss() -> &'static [Location] {
        &[Location::MountainPass, Location::DarkCave]
    }

    pub fn from_name(name: &str) -> Option<Location> {
        Location::ALL.into_iter().find(|loc| loc.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
