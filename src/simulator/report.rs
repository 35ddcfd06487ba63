//! Simulation report generation.

use super::config::SimConfig;
use crate::core::constants::PERCENT;
use crate::expectation::TierYield;
use crate::sampler::TierHistogram;
use crate::tables::CascadeChain;
use serde::Serialize;

/// Sampled histograms next to their closed-form expectation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub count: u64,
    pub seed: Option<u64>,
    pub stages: usize,
    pub tiers: Vec<TierHistogram>,
    pub expected: Vec<TierYield>,
    /// Percent of first-tier draws expected to reach the last tier
    pub theoretical_survival: f64,
    /// Percent of first-tier draws that actually reached the last tier
    pub actual_survival: f64,
}

impl SimReport {
    pub fn new(
        config: &SimConfig,
        chain: &CascadeChain,
        tiers: Vec<TierHistogram>,
        expected: Vec<TierYield>,
        survival: f64,
    ) -> Self {
        let reached_last = if tiers.len() == chain.depth() {
            tiers.last().map(|t| t.entered).unwrap_or(0)
        } else {
            0
        };
        let actual_survival = if config.count == 0 {
            0.0
        } else {
            reached_last as f64 / config.count as f64 * PERCENT
        };

        Self {
            count: config.count,
            seed: config.seed,
            stages: chain.depth(),
            tiers,
            expected,
            theoretical_survival: survival * PERCENT,
            actual_survival,
        }
    }

    /// Expected count of `name` at `tier`, 0 if that tier was never reached.
    pub fn expected_count(&self, tier: usize, name: &str) -> f64 {
        self.expected
            .get(tier)
            .map(|t| t.terminal.get(name))
            .unwrap_or(0.0)
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Draws: {}", self.count));
        if let Some(seed) = self.seed {
            report.push_str(&format!("  (seed {})", seed));
        }
        report.push_str("\n\n");

        for (i, tier) in self.tiers.iter().enumerate() {
            report.push_str(&format!(
                "── TIER {} · {} ── entered {}, advanced {}\n",
                i, tier.stage, tier.entered, tier.advanced
            ));
            report.push_str(&format!(
                "  {:<38} {:>8} {:>8} {:>10}\n",
                "Item", "Count", "Share", "Expected"
            ));
            for outcome in tier.sorted_by_count() {
                let share = outcome.count as f64 / tier.entered.max(1) as f64 * PERCENT;
                report.push_str(&format!(
                    "  {:<38} {:>8} {:>7.2}% {:>10.2}\n",
                    outcome.name,
                    outcome.count,
                    share,
                    self.expected_count(i, &outcome.name)
                ));
            }
            if tier.leftover > 0.0 {
                report.push_str(&format!("  (leftover toward next tier: {})\n", tier.leftover));
            }
            report.push('\n');
        }

        if self.stages > 1 {
            report.push_str("── SURVIVAL ─────────────────────────────────────────────────────\n");
            report.push_str(&format!(
                "  Theoretical:  {:.2}%\n",
                self.theoretical_survival
            ));
            report.push_str(&format!("  Actual:       {:.2}%\n", self.actual_survival));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
