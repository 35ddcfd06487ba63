use super::types::{BundleAllocation, BundleBook, Inventory};
use crate::error::{LootError, Result};

/// Greedily complete bundles in priority order.
///
/// Each bundle takes as many completions as its scarcest item allows, and the
/// next bundle sees what is left. Reordering priority changes the result when
/// recipes share an item.
pub fn allocate(inventory: &Inventory, book: &BundleBook) -> Result<BundleAllocation> {
    let mut remaining = inventory.clone();
    let mut allocation = BundleAllocation::default();

    for name in &book.priority {
        let recipe = book.recipe(name).ok_or_else(|| {
            LootError::config(format!("bundle '{name}' is prioritized but has no recipe"))
        })?;
        recipe.validate()?;

        let count = recipe
            .items
            .iter()
            .map(|item| remaining.get(item))
            .fold(f64::INFINITY, f64::min);

        if count > 0.0 {
            allocation.bundles.add(name, count);
            for item in &recipe.items {
                let left = remaining.get(item) - count;
                debug_assert!(left >= 0.0, "bundle '{name}' overdrew '{item}'");
                remaining.set(item, left);
            }
            tracing::debug!(bundle = %name, count, "bundle allocated");
        }
    }

    allocation.residual = remaining;
    Ok(allocation)
}
