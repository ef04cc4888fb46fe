//! Skill forest: per-skill levels, stat bonuses, and upgrade gating.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of a skill inside its `SkillTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillStat {
    Attack,
    Defense,
    WeatherResistance,
}

impl SkillStat {
    pub fn name(&self) -> &'static str {
        match self {
            SkillStat::Attack => "attack",
            SkillStat::Defense => "defense",
            SkillStat::WeatherResistance => "weather_resistance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub max_level: u32,
    pub current_level: u32,
    /// Bonus granted per level.
    pub stat_effects: BTreeMap<SkillStat, u32>,
    pub required_level: u32,
    pub parent: Option<SkillId>,
}

impl Skill {
    pub fn new(name: &str, description: &str, max_level: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            max_level,
            current_level: 0,
            stat_effects: BTreeMap::new(),
            required_level: 1,
            parent: None,
        }
    }

    pub fn with_effect(mut self, stat: SkillStat, per_level: u32) -> Self {
        self.stat_effects.insert(stat, per_level);
        self
    }

    pub fn requiring_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    pub fn is_maxed(&self) -> bool {
        self.current_level >= self.max_level
    }

    /// Total bonus this skill currently grants to one stat.
    pub fn bonus(&self, stat: SkillStat) -> u32 {
        self.stat_effects.get(&stat).copied().unwrap_or(0) * self.current_level
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillTree {
    skills: Vec<Skill>,
}

impl SkillTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The forest every new character starts with.
    pub fn starting() -> Self {
        let mut tree = Self::new();
        let sword_mastery = tree.add(
            Skill::new("Sword Mastery", "Increases attack with swords", 5)
                .with_effect(SkillStat::Attack, 2),
        );
        tree.add(
            Skill::new("Heavy Armor", "Increases defense with heavy armor", 5)
                .with_effect(SkillStat::Defense, 3),
        );
        tree.add_child(
            Skill::new("Dual Wielding", "Allows wielding two one-handed weapons", 1)
                .requiring_level(5),
            sword_mastery,
        );
        tree.add(Skill::new(
            "Blacksmithing",
            "Allows crafting better weapons and armor",
            5,
        ));
        tree.add(Skill::new("Alchemy", "Allows crafting better potions", 5));
        tree.add(
            Skill::new(
                "Survival",
                "Reduces weather effects and increases exploration rewards",
                5,
            )
            .with_effect(SkillStat::WeatherResistance, 5),
        );
        tree
    }

    /// Adds a root skill.
    pub fn add(&mut self, mut skill: Skill) -> SkillId {
        skill.parent = None;
        self.push(skill)
    }

    /// Adds a skill under an existing parent. An unknown parent leaves the
    /// skill as a root.
    pub fn add_child(&mut self, mut skill: Skill, parent: SkillId) -> SkillId {
        skill.parent = (parent.0 < self.skills.len()).then_some(parent);
        self.push(skill)
    }

    fn push(&mut self, skill: Skill) -> SkillId {
        self.skills.push(skill);
        SkillId(self.skills.len() - 1)
    }

    /// Links an existing skill to a parent, refusing links that would
    /// form a cycle.
    pub fn set_parent(&mut self, child: SkillId, parent: SkillId) -> bool {
        if child.0 >= self.skills.len() || parent.0 >= self.skills.len() {
            return false;
        }
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return false;
            }
            cursor = self.skills[id.0].parent;
        }
        self.skills[child.0].parent = Some(parent);
        true
    }

    pub fn find(&self, name: &str) -> Option<SkillId> {
        self.skills
            .iter()
            .position(|skill| skill.name == name)
            .map(SkillId)
    }

    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.get(id.0)
    }

    pub fn by_name(&self, name: &str) -> Option<&Skill> {
        self.find(name).and_then(|id| self.get(id))
    }

    pub fn parent_of(&self, id: SkillId) -> Option<&Skill> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    pub fn level_of(&self, name: &str) -> u32 {
        self.by_name(name).map_or(0, |skill| skill.current_level)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// A skill can be raised when it is below max level, the player meets
    /// its level requirement, and its parent (if any) is maxed.
    pub fn can_upgrade(&self, id: SkillId, player_level: u32) -> bool {
        let Some(skill) = self.get(id) else {
            return false;
        };
        if skill.is_maxed() || player_level < skill.required_level {
            return false;
        }
        self.parent_of(id).map_or(true, Skill::is_maxed)
    }

    /// Raises a skill by one level, returning the per-level effects gained.
    pub fn upgrade(&mut self, name: &str, player_level: u32) -> Option<BTreeMap<SkillStat, u32>> {
        let id = self.find(name)?;
        if !self.can_upgrade(id, player_level) {
            return None;
        }
        let skill = &mut self.skills[id.0];
        skill.current_level += 1;
        Some(skill.stat_effects.clone())
    }

    /// Sum of one stat's bonus across every skill.
    pub fn bonus(&self, stat: SkillStat) -> u32 {
        self.skills.iter().map(|skill| skill.bonus(stat)).sum()
    }
}
