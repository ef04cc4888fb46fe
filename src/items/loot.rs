use super::types::Item;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One loot table row: the item and its independent drop probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: Item,
    pub chance: f64,
}

/// Ordered list of independent drops, rolled once per victory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry; the chance is clamped into [0, 1].
    pub fn add(&mut self, item: Item, chance: f64) {
        self.entries.push(LootEntry {
            item,
            chance: chance.clamp(0.0, 1.0),
        });
    }

    pub fn with(mut self, item: Item, chance: f64) -> Self {
        self.add(item, chance);
        self
    }

    pub fn entries(&self) -> &[LootEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rolls every entry independently. A draw in [0, 1) drops the item when
    /// it is strictly below the entry chance, so 1.0 always drops and 0.0
    /// never does.
    pub fn roll(&self, rng: &mut impl Rng) -> Vec<Item> {
        self.entries
            .iter()
            .filter(|entry| rng.gen::<f64>() < entry.chance)
            .map(|entry| entry.item.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_table() -> LootTable {
        LootTable::new()
            .with(Item::misc("Always", 1), 1.0)
            .with(Item::misc("Never", 1), 0.0)
            .with(Item::misc("Sometimes", 1), 0.5)
    }

    #[test]
    fn test_certain_and_impossible_entries() {
        let table = sample_table();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let loot = table.roll(&mut rng);
            assert!(loot.iter().any(|i| i.name == "Always"));
            assert!(!loot.iter().any(|i| i.name == "Never"));
        }
    }

    #[test]
    fn test_entries_are_independent() {
        let table = sample_table();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut with_sometimes = 0;
        let mut without_sometimes = 0;
        for _ in 0..1000 {
            let loot = table.roll(&mut rng);
            if loot.iter().any(|i| i.name == "Sometimes") {
                with_sometimes += 1;
            } else {
                without_sometimes += 1;
            }
        }
        // Both outcomes happen; "Always" dropping never excludes the others.
        assert!(with_sometimes > 300);
        assert!(without_sometimes > 300);
    }

    #[test]
    fn test_extreme_draws() {
        let table = sample_table();

        // Draw of exactly 0.0 drops everything with a positive chance.
        let mut zero = StepRng::new(0, 0);
        let loot = table.roll(&mut zero);
        let names: Vec<_> = loot.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Always", "Sometimes"]);

        // Draw just below 1.0 only drops the certain entry.
        let mut almost_one = StepRng::new(u64::MAX, 0);
        let loot = table.roll(&mut almost_one);
        let names: Vec<_> = loot.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Always"]);
    }

    #[test]
    fn test_chance_is_clamped() {
        let table = LootTable::new().with(Item::misc("Over", 1), 4.0);
        assert_eq!(table.entries()[0].chance, 1.0);
    }

    #[test]
    fn test_empty_table_drops_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(LootTable::new().roll(&mut rng).is_empty());
    }
}
