use crate::bundles::BundleBook;
use crate::core::constants::MAX_SIMULATION_COUNT;
use crate::error::{LootError, Result};
use crate::tables::CascadeChain;
use serde::{Deserialize, Serialize};

/// One purchasable loot box: its price, what it drops, and how drops combine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GachaProfile {
    pub name: String,
    /// Points per draw
    pub draw_price: f64,
    pub chain: CascadeChain,
    #[serde(default)]
    pub bundles: BundleBook,
}

impl GachaProfile {
    pub fn validate(&self) -> Result<()> {
        if !self.draw_price.is_finite() || self.draw_price <= 0.0 {
            return Err(LootError::config(format!(
                "profile '{}' has draw price {}, must be positive",
                self.name, self.draw_price
            )));
        }
        self.bundles.validate()
    }
}

fn default_max_simulation_count() -> u64 {
    MAX_SIMULATION_COUNT
}

/// Every profile the calculator knows plus global limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GachaConfig {
    #[serde(default = "default_max_simulation_count")]
    pub max_simulation_count: u64,
    pub profiles: Vec<GachaProfile>,
}

impl Default for GachaConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GachaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(LootError::config("config defines no profiles"));
        }
        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(LootError::config(format!(
                    "profile '{}' is defined twice",
                    profile.name
                )));
            }
        }
        Ok(())
    }

    pub fn profile(&self, name: &str) -> Result<&GachaProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| LootError::invalid(format!("unknown profile '{name}'")))
    }

    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }
}
