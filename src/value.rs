//! Monetary value and return on investment.

use crate::core::constants::PERCENT;
use crate::error::{LootError, Result};
use crate::expectation::ItemCounts;
use crate::tables::ProbabilityTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unit value per item or bundle name. Names without an entry are worth 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemValues(HashMap<String, f64>);

impl ItemValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.0.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in &self.0 {
            if !value.is_finite() || *value < 0.0 {
                return Err(LootError::invalid(format!(
                    "value of '{name}' must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for ItemValues {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Σ count × unit value.
pub fn aggregate_value(counts: &ItemCounts, values: &ItemValues) -> f64 {
    counts
        .iter()
        .map(|(name, count)| count * values.get(name))
        .sum()
}

/// Value contributed by each entry, in the order of `counts`.
pub fn contributions(counts: &ItemCounts, values: &ItemValues) -> ItemCounts {
    counts
        .iter()
        .map(|(name, count)| (name.to_string(), count * values.get(name)))
        .collect()
}

/// Expected value of a single draw from `table`.
pub fn ev_per_draw(table: &ProbabilityTable, values: &ItemValues) -> f64 {
    table
        .entries()
        .iter()
        .map(|e| e.weight / PERCENT * values.get(&e.name))
        .sum()
}

/// Return on investment in percent; 0 when nothing was invested.
pub fn roi(total_value: f64, investment: f64) -> f64 {
    if investment > 0.0 {
        (total_value - investment) / investment * PERCENT
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> ItemValues {
        pairs.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn test_aggregate_defaults_missing_to_zero() {
        let mut counts = ItemCounts::new();
        counts.add("gem", 2.0);
        counts.add("junk", 100.0);
        let total = aggregate_value(&counts, &values(&[("gem", 50.0)]));
        assert!((total - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roi_identities() {
        assert_eq!(roi(500.0, 500.0), 0.0);
        assert_eq!(roi(123.0, 0.0), 0.0);
        assert_eq!(roi(123.0, -5.0), 0.0);
        assert!((roi(150.0, 100.0) - 50.0).abs() < 1e-12);
        assert!((roi(0.0, 100.0) + 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_negative() {
        assert!(values(&[("gem", -1.0)]).validate().is_err());
        assert!(values(&[("gem", f64::INFINITY)]).validate().is_err());
        assert!(values(&[("gem", 0.0)]).validate().is_ok());
    }

    #[test]
    fn test_ev_per_draw() {
        let table = ProbabilityTable::from_pairs(&[("gem", 10.0), ("junk", 90.0)]).unwrap();
        let ev = ev_per_draw(&table, &values(&[("gem", 30.0)]));
        assert!((ev - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_contributions_follow_counts() {
        let mut counts = ItemCounts::new();
        counts.add("a", 1.0);
        counts.add("b", 2.0);
        let parts = contributions(&counts, &values(&[("b", 5.0)]));
        assert_eq!(parts.get("a"), 0.0);
        assert_eq!(parts.get("b"), 10.0);
    }

    #[test]
    fn test_values_json_is_a_plain_object() {
        let parsed: ItemValues = serde_json::from_str(r#"{"gem": 12.5}"#).unwrap();
        assert_eq!(parsed.get("gem"), 12.5);
    }
}
