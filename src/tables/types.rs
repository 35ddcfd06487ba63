use crate::core::constants::{DEFAULT_UNITS_PER_DRAW, PERCENT, WEIGHT_SUM_TOLERANCE};
use crate::error::{LootError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of a probability table: an outcome name and its weight in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedOutcome {
    pub name: String,
    pub weight: f64,
}

impl WeightedOutcome {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Ordered outcome table. Declaration order decides sampler tie-breaks, so it
/// is kept exactly as given.
///
/// Weights must sum to 100 (within `WEIGHT_SUM_TOLERANCE`); tables are never
/// rescaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightedOutcome>", into = "Vec<WeightedOutcome>")]
pub struct ProbabilityTable {
    entries: Vec<WeightedOutcome>,
}

impl ProbabilityTable {
    pub fn new(entries: Vec<WeightedOutcome>) -> Result<Self> {
        if entries.is_empty() {
            return Err(LootError::config("probability table has no entries"));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        let mut sum = 0.0;
        for entry in &entries {
            if entry.name.is_empty() {
                return Err(LootError::config("probability table has an unnamed entry"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(LootError::config(format!(
                    "outcome '{}' appears twice in the same table",
                    entry.name
                )));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 || entry.weight > PERCENT {
                return Err(LootError::config(format!(
                    "outcome '{}' has weight {} outside 0-100",
                    entry.name, entry.weight
                )));
            }
            sum += entry.weight;
        }

        if (sum - PERCENT).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(LootError::config(format!(
                "table weights sum to {sum}, expected 100"
            )));
        }

        Ok(Self { entries })
    }

    /// Build a table from `(name, weight)` pairs.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|(name, weight)| WeightedOutcome::new(*name, *weight))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[WeightedOutcome] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight_of(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.weight)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

impl TryFrom<Vec<WeightedOutcome>> for ProbabilityTable {
    type Error = LootError;

    fn try_from(entries: Vec<WeightedOutcome>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ProbabilityTable> for Vec<WeightedOutcome> {
    fn from(table: ProbabilityTable) -> Self {
        table.entries
    }
}

fn default_units_per_draw() -> f64 {
    DEFAULT_UNITS_PER_DRAW
}

/// A table plus the outcome (if any) that feeds the next stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeStage {
    pub name: String,
    pub table: ProbabilityTable,
    #[serde(default)]
    pub continue_item: Option<String>,
    /// Continue items needed for one draw of the next stage.
    #[serde(default = "default_units_per_draw")]
    pub units_per_draw: f64,
}

impl CascadeStage {
    /// A stage whose `continue_item` outcome becomes one draw of the next stage.
    pub fn new(
        name: impl Into<String>,
        table: ProbabilityTable,
        continue_item: impl Into<String>,
    ) -> Result<Self> {
        let stage = Self {
            name: name.into(),
            table,
            continue_item: Some(continue_item.into()),
            units_per_draw: DEFAULT_UNITS_PER_DRAW,
        };
        stage.validate()?;
        Ok(stage)
    }

    /// A stage where every outcome is final.
    pub fn terminal(name: impl Into<String>, table: ProbabilityTable) -> Self {
        Self {
            name: name.into(),
            table,
            continue_item: None,
            units_per_draw: DEFAULT_UNITS_PER_DRAW,
        }
    }

    pub fn with_units_per_draw(mut self, units: f64) -> Result<Self> {
        self.units_per_draw = units;
        self.validate()?;
        Ok(self)
    }

    /// An exchange rate may only shrink the next tier: `units_per_draw` is at
    /// least one, so no stage spawns more draws than it received.
    pub fn validate(&self) -> Result<()> {
        if !self.units_per_draw.is_finite() || self.units_per_draw < DEFAULT_UNITS_PER_DRAW {
            return Err(LootError::config(format!(
                "stage '{}' has units_per_draw {}, must be at least {}",
                self.name, self.units_per_draw, DEFAULT_UNITS_PER_DRAW
            )));
        }
        if let Some(item) = &self.continue_item {
            if self.table.position(item).is_none() {
                return Err(LootError::config(format!(
                    "stage '{}' continues on '{}' which is not in its table",
                    self.name, item
                )));
            }
        }
        Ok(())
    }

    pub fn is_continue(&self, name: &str) -> bool {
        self.continue_item.as_deref() == Some(name)
    }

    /// Table index of the continue outcome.
    pub fn continue_index(&self) -> Option<usize> {
        self.continue_item
            .as_deref()
            .and_then(|item| self.table.position(item))
    }

    /// Chance (0-1) that a single draw at this stage continues.
    pub fn continue_chance(&self) -> f64 {
        self.continue_item
            .as_deref()
            .and_then(|item| self.table.weight_of(item))
            .map(|w| w / PERCENT)
            .unwrap_or(0.0)
    }
}

/// Ordered stages; the continue outcome of stage i is the draw count of
/// stage i+1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CascadeStage>", into = "Vec<CascadeStage>")]
pub struct CascadeChain {
    stages: Vec<CascadeStage>,
}

impl CascadeChain {
    pub fn new(stages: Vec<CascadeStage>) -> Result<Self> {
        if stages.is_empty() {
            return Err(LootError::config("cascade chain has no stages"));
        }
        for stage in &stages {
            stage.validate()?;
        }
        Ok(Self { stages })
    }

    /// A chain with one terminal stage.
    pub fn single(name: impl Into<String>, table: ProbabilityTable) -> Self {
        Self {
            stages: vec![CascadeStage::terminal(name, table)],
        }
    }

    pub fn stages(&self) -> &[CascadeStage] {
        &self.stages
    }

    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    pub fn first(&self) -> &CascadeStage {
        &self.stages[0]
    }

    /// Same chain cut after its first stage, with that stage made terminal so
    /// the continue outcome is reported as an ordinary item.
    pub fn head_only(&self) -> Self {
        let head = &self.stages[0];
        Self {
            stages: vec![CascadeStage::terminal(head.name.clone(), head.table.clone())],
        }
    }

    /// Chain starting at `index`.
    pub fn tail_from(&self, index: usize) -> Result<Self> {
        Self::new(self.stages.iter().skip(index).cloned().collect())
    }
}

impl TryFrom<Vec<CascadeStage>> for CascadeChain {
    type Error = LootError;

    fn try_from(stages: Vec<CascadeStage>) -> Result<Self> {
        Self::new(stages)
    }
}

impl From<CascadeChain> for Vec<CascadeStage> {
    fn from(chain: CascadeChain) -> Self {
        chain.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin() -> ProbabilityTable {
        ProbabilityTable::from_pairs(&[("heads", 50.0), ("tails", 50.0)]).unwrap()
    }

    #[test]
    fn test_table_keeps_declaration_order() {
        let table =
            ProbabilityTable::from_pairs(&[("z", 10.0), ("a", 60.0), ("m", 30.0)]).unwrap();
        let names: Vec<_> = table.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_table_rejects_bad_sum() {
        let err = ProbabilityTable::from_pairs(&[("a", 50.0), ("b", 40.0)]).unwrap_err();
        assert!(matches!(err, LootError::Configuration(_)));
    }

    #[test]
    fn test_table_rejects_negative_weight() {
        let err = ProbabilityTable::from_pairs(&[("a", 110.0), ("b", -10.0)]).unwrap_err();
        assert!(matches!(err, LootError::Configuration(_)));
    }

    #[test]
    fn test_table_rejects_duplicates_and_empty() {
        assert!(ProbabilityTable::from_pairs(&[("a", 50.0), ("a", 50.0)]).is_err());
        assert!(ProbabilityTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_table_accepts_float_noise() {
        // 0.1 * 10 does not sum to exactly 100 in binary
        let pairs: Vec<(String, f64)> = (0..1000).map(|i| (format!("i{i}"), 0.1)).collect();
        let refs: Vec<(&str, f64)> = pairs.iter().map(|(n, w)| (n.as_str(), *w)).collect();
        assert!(ProbabilityTable::from_pairs(&refs).is_ok());
    }

    #[test]
    fn test_stage_requires_continue_item_in_table() {
        let err = CascadeStage::new("flip", coin(), "edge").unwrap_err();
        assert!(matches!(err, LootError::Configuration(_)));
        assert!(CascadeStage::new("flip", coin(), "heads").is_ok());
    }

    #[test]
    fn test_stage_rejects_units_below_one() {
        let stage = CascadeStage::new("flip", coin(), "heads").unwrap();
        assert!(stage.clone().with_units_per_draw(0.0).is_err());
        assert!(matches!(
            stage.clone().with_units_per_draw(0.001),
            Err(LootError::Configuration(_))
        ));
        assert!(stage.clone().with_units_per_draw(1e-300).is_err());
        assert!(stage.clone().with_units_per_draw(f64::NAN).is_err());
        assert!(stage.with_units_per_draw(1.0).is_ok());
    }

    #[test]
    fn test_continue_chance() {
        let stage = CascadeStage::new("flip", coin(), "tails").unwrap();
        assert!((stage.continue_chance() - 0.5).abs() < f64::EPSILON);
        assert_eq!(stage.continue_index(), Some(1));
        assert_eq!(CascadeStage::terminal("end", coin()).continue_chance(), 0.0);
    }

    #[test]
    fn test_chain_rejects_empty() {
        assert!(CascadeChain::new(Vec::new()).is_err());
    }

    #[test]
    fn test_table_json_is_an_ordered_array() {
        let json = serde_json::to_string(&coin()).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"heads","weight":50.0},{"name":"tails","weight":50.0}]"#
        );
        let bad = r#"[{"name":"heads","weight":50.0}]"#;
        assert!(serde_json::from_str::<ProbabilityTable>(bad).is_err());
    }

    #[test]
    fn test_chain_json_validates_continue_item() {
        let json = r#"[{"name":"flip","table":[{"name":"heads","weight":100.0}],"continue_item":"tails"}]"#;
        assert!(serde_json::from_str::<CascadeChain>(json).is_err());
    }
}
