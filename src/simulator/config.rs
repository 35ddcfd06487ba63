//! Simulation configuration.

use crate::core::constants::{DEFAULT_SIMULATION_COUNT, MAX_SIMULATION_COUNT};
use crate::error::{LootError, Result};
use crate::tables::CascadeChain;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of first-tier draws
    pub count: u64,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Hard cap on `count`; larger requests are rejected
    pub max_count: u64,

    /// Skip this many leading stages (1 on the starlight chain starts at the ladder)
    pub start_tier: usize,

    /// Stop after the first simulated stage
    pub first_tier_only: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per tier)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SIMULATION_COUNT,
            seed: None,
            max_count: MAX_SIMULATION_COUNT,
            start_tier: 0,
            first_tier_only: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for the first table alone
    pub fn first_tier(count: u64) -> Self {
        Self {
            count,
            first_tier_only: true,
            ..Default::default()
        }
    }

    /// Quick config for a ladder entered one stage in
    pub fn ladder(count: u64) -> Self {
        Self {
            count,
            start_tier: 1,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.count > self.max_count {
            return Err(LootError::invalid(format!(
                "simulation count {} exceeds the maximum of {}",
                self.count, self.max_count
            )));
        }
        Ok(())
    }

    /// The part of `chain` this config simulates.
    pub fn scoped_chain(&self, chain: &CascadeChain) -> Result<CascadeChain> {
        if self.start_tier >= chain.depth() {
            return Err(LootError::invalid(format!(
                "start tier {} is past the end of a {}-stage chain",
                self.start_tier,
                chain.depth()
            )));
        }
        let scoped = chain.tail_from(self.start_tier)?;
        Ok(if self.first_tier_only {
            scoped.head_only()
        } else {
            scoped
        })
    }
}
