use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One named quantity, the serialized form of an `ItemCounts` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCount {
    pub name: String,
    pub count: f64,
}

/// Ordered name -> quantity tally. Keeps first-insertion order so reports list
/// items the way their tables declare them. Serializes as an array of
/// `{name, count}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ItemCount>", into = "Vec<ItemCount>")]
pub struct ItemCounts {
    entries: Vec<(String, f64)>,
}

impl ItemCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> f64 {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Add `amount` to `name`, appending it if new.
    pub fn add(&mut self, name: &str, amount: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v += amount,
            None => self.entries.push((name.to_string(), amount)),
        }
    }

    /// Overwrite the quantity of `name`, appending it if new.
    pub fn set(&mut self, name: &str, amount: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = amount,
            None => self.entries.push((name.to_string(), amount)),
        }
    }

    pub fn merge(&mut self, other: &ItemCounts) {
        for (name, amount) in other.iter() {
            self.add(name, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Unordered copy for keyed lookups.
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.entries.iter().cloned().collect()
    }
}

impl From<Vec<ItemCount>> for ItemCounts {
    fn from(items: Vec<ItemCount>) -> Self {
        items.into_iter().map(|i| (i.name, i.count)).collect()
    }
}

impl From<ItemCounts> for Vec<ItemCount> {
    fn from(counts: ItemCounts) -> Self {
        counts
            .entries
            .into_iter()
            .map(|(name, count)| ItemCount { name, count })
            .collect()
    }
}

impl FromIterator<(String, f64)> for ItemCounts {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut counts = ItemCounts::new();
        for (name, amount) in iter {
            counts.add(&name, amount);
        }
        counts
    }
}

/// Terminal yield of one cascade tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierYield {
    pub stage: String,
    /// Draws performed at this tier.
    pub entered: f64,
    pub terminal: ItemCounts,
}

/// Result of resolving a cascade in closed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub tiers: Vec<TierYield>,
    /// Continue count left after the last tier reached.
    pub final_continue_count: f64,
}

impl CascadeOutcome {
    /// All tiers' terminal yields folded into one tally.
    pub fn merged(&self) -> ItemCounts {
        let mut all = ItemCounts::new();
        for tier in &self.tiers {
            all.merge(&tier.terminal);
        }
        all
    }

    pub fn tier(&self, index: usize) -> Option<&TierYield> {
        self.tiers.get(index)
    }
}
