use crate::error::{LootError, Result};
use crate::expectation::ItemCounts;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Available item quantities during one allocation pass.
pub type Inventory = ItemCounts;

/// A named set of distinct items, one unit of each, completed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleRecipe {
    pub name: String,
    pub items: Vec<String>,
}

impl BundleRecipe {
    pub fn new(name: impl Into<String>, items: &[&str]) -> Self {
        Self {
            name: name.into(),
            items: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// At least one item, each listed once.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(LootError::config(format!(
                "bundle '{}' has no required items",
                self.name
            )));
        }
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.as_str()) {
                return Err(LootError::config(format!(
                    "bundle '{}' lists '{}' more than once",
                    self.name, item
                )));
            }
        }
        Ok(())
    }
}

/// Recipes plus the order in which they are filled (highest value first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleBook {
    pub recipes: Vec<BundleRecipe>,
    pub priority: Vec<String>,
}

impl BundleBook {
    /// Book whose priority is the recipe declaration order.
    pub fn in_order(recipes: Vec<BundleRecipe>) -> Self {
        let priority = recipes.iter().map(|r| r.name.clone()).collect();
        Self { recipes, priority }
    }

    pub fn recipe(&self, name: &str) -> Option<&BundleRecipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.priority.is_empty()
    }

    /// Same recipes, different priority.
    pub fn with_priority(&self, priority: &[&str]) -> Self {
        Self {
            recipes: self.recipes.clone(),
            priority: priority.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for name in &self.priority {
            self.recipe(name)
                .ok_or_else(|| {
                    LootError::config(format!("bundle '{name}' is prioritized but has no recipe"))
                })?
                .validate()?;
        }
        Ok(())
    }
}

/// Outcome of one greedy allocation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleAllocation {
    /// Completed bundles in priority order; bundles that got nothing are left out.
    pub bundles: ItemCounts,
    /// What remains of the inventory afterwards.
    pub residual: Inventory,
}
