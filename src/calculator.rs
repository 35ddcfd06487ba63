//! Expected-value calculator: investment in, expected drops, bundles, value
//! and ROI out.

use crate::bundles::allocate;
use crate::config::GachaProfile;
use crate::error::Result;
use crate::expectation::{resolve_cascade, ItemCounts, TierYield};
use crate::purchase::{calculate_points, PurchaseMethod};
use crate::value::{aggregate_value, roi, ItemValues};
use serde::{Deserialize, Serialize};

fn default_expand() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationRequest {
    pub investment: f64,
    pub method: PurchaseMethod,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub item_values: ItemValues,
    /// Follow the cascade past the first table. When false, the continue
    /// outcome of the first table is reported as an ordinary item.
    #[serde(default = "default_expand")]
    pub expand: bool,
}

impl ExpectationRequest {
    pub fn new(investment: f64, method: PurchaseMethod, discount: f64) -> Self {
        Self {
            investment,
            method,
            discount,
            item_values: ItemValues::new(),
            expand: true,
        }
    }

    pub fn with_values(mut self, item_values: ItemValues) -> Self {
        self.item_values = item_values;
        self
    }

    pub fn first_tier_only(mut self) -> Self {
        self.expand = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationReport {
    pub profile: String,
    pub points: f64,
    pub draw_count: f64,
    /// Money spent per draw
    pub cost_per_draw: f64,
    /// All tiers' terminal yields combined
    pub expected_item_counts: ItemCounts,
    pub tier_yields: Vec<TierYield>,
    pub expected_bundle_counts: ItemCounts,
    /// Items left over after bundles took their share
    pub residual_items: ItemCounts,
    pub expected_value: f64,
    pub roi: f64,
}

/// Run the whole expectation pipeline for one profile.
///
/// Value counts completed bundles plus whatever items the bundles did not
/// consume, so an item is never valued both alone and inside a bundle.
pub fn compute_expectation(
    profile: &GachaProfile,
    request: &ExpectationRequest,
) -> Result<ExpectationReport> {
    profile.validate()?;
    request.item_values.validate()?;

    let points = calculate_points(request.investment, request.method, request.discount)?;
    let draw_count = points / profile.draw_price;
    let cost_per_draw = if draw_count > 0.0 {
        request.investment / draw_count
    } else {
        0.0
    };

    let outcome = if request.expand {
        resolve_cascade(draw_count, &profile.chain)?
    } else {
        resolve_cascade(draw_count, &profile.chain.head_only())?
    };
    let expected_item_counts = outcome.merged();

    let allocation = allocate(&expected_item_counts, &profile.bundles)?;
    let expected_value = aggregate_value(&allocation.bundles, &request.item_values)
        + aggregate_value(&allocation.residual, &request.item_values);
    let roi = roi(expected_value, request.investment);

    tracing::debug!(
        profile = %profile.name,
        points,
        draw_count,
        expected_value,
        roi,
        "expectation computed"
    );

    Ok(ExpectationReport {
        profile: profile.name.clone(),
        points,
        draw_count,
        cost_per_draw,
        expected_item_counts,
        tier_yields: outcome.tiers,
        expected_bundle_counts: allocation.bundles,
        residual_items: allocation.residual,
        expected_value,
        roi,
    })
}

impl ExpectationReport {
    /// Generate a text report.
    pub fn to_text(&self, values: &ItemValues) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str(&format!("                 EXPECTED VALUE: {}\n", self.profile));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("  Points:          {:.0}\n", self.points));
        report.push_str(&format!("  Draws:           {:.2}\n", self.draw_count));
        report.push_str(&format!("  Cost per Draw:   {:.2}\n\n", self.cost_per_draw));

        for (i, tier) in self.tier_yields.iter().enumerate() {
            report.push_str(&format!(
                "── TIER {} · {} ({:.4} draws) ",
                i, tier.stage, tier.entered
            ));
            report.push_str("──────────────\n");
            for (name, count) in tier.terminal.iter() {
                let unit = values.get(name);
                if unit > 0.0 {
                    report.push_str(&format!(
                        "  {:<38} {:>12.4}  × {:>8.2} = {:>10.2}\n",
                        name,
                        count,
                        unit,
                        count * unit
                    ));
                } else {
                    report.push_str(&format!("  {:<38} {:>12.4}\n", name, count));
                }
            }
            report.push('\n');
        }

        if !self.expected_bundle_counts.is_empty() {
            report.push_str("── BUNDLES ──────────────────────────────────────────────────────\n");
            for (name, count) in self.expected_bundle_counts.iter() {
                report.push_str(&format!("  {:<38} {:>12.4}\n", name, count));
            }
            report.push('\n');
        }

        report.push_str("── RETURN ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Expected Value:  {:.2}\n", self.expected_value));
        report.push_str(&format!("  ROI:             {:+.2}%\n", self.roi));
        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
