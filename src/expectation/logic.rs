use super::types::{CascadeOutcome, ItemCounts, TierYield};
use crate::core::constants::PERCENT;
use crate::error::{LootError, Result};
use crate::tables::{CascadeChain, ProbabilityTable};

/// Expected count of every outcome after `draw_count` draws.
pub fn expect(draw_count: f64, table: &ProbabilityTable) -> Result<ItemCounts> {
    if !draw_count.is_finite() || draw_count < 0.0 {
        return Err(LootError::invalid(format!(
            "draw count must be a non-negative number, got {draw_count}"
        )));
    }

    Ok(table
        .entries()
        .iter()
        .map(|e| (e.name.clone(), draw_count * e.weight / PERCENT))
        .collect())
}

/// Walk a cascade in closed form, keeping each tier's terminal yield apart.
///
/// Stops as soon as no draws are left for the next tier.
pub fn resolve_cascade(initial_draw_count: f64, chain: &CascadeChain) -> Result<CascadeOutcome> {
    if !initial_draw_count.is_finite() || initial_draw_count < 0.0 {
        return Err(LootError::invalid(format!(
            "draw count must be a non-negative number, got {initial_draw_count}"
        )));
    }

    let mut continue_count = initial_draw_count;
    let mut outcome = CascadeOutcome::default();

    for (tier, stage) in chain.stages().iter().enumerate() {
        if continue_count <= 0.0 {
            tracing::debug!(tier, stage = %stage.name, "cascade exhausted early");
            break;
        }

        let expected = expect(continue_count, &stage.table)?;
        let mut terminal = ItemCounts::new();
        let mut next = 0.0;
        for (name, count) in expected.iter() {
            if stage.is_continue(name) {
                next = count / stage.units_per_draw;
            } else {
                terminal.add(name, count);
            }
        }

        outcome.tiers.push(TierYield {
            stage: stage.name.clone(),
            entered: continue_count,
            terminal,
        });
        continue_count = next;
    }

    outcome.final_continue_count = continue_count;
    Ok(outcome)
}

/// Chance that one first-tier draw makes it to the last tier.
pub fn survival_probability(chain: &CascadeChain) -> f64 {
    chain
        .stages()
        .iter()
        .filter(|s| s.continue_item.is_some())
        .map(|s| s.continue_chance() / s.units_per_draw)
        .product()
}
