use super::types::{OutcomeCount, TierHistogram};
use crate::core::constants::PERCENT;
use crate::tables::{CascadeChain, ProbabilityTable};
use rand::Rng;

/// Roll once against `table` and return the index of the hit.
///
/// Walks the table in declaration order; if float rounding leaves the roll
/// above the last cumulative bound, the last entry wins.
pub fn draw_index(table: &ProbabilityTable, rng: &mut impl Rng) -> usize {
    let roll = rng.gen::<f64>() * PERCENT;
    let mut cumulative = 0.0;

    for (i, entry) in table.entries().iter().enumerate() {
        cumulative += entry.weight;
        if roll < cumulative {
            return i;
        }
    }

    table.len() - 1
}

/// Roll once against `table` and return the outcome name.
pub fn draw_one<'a>(table: &'a ProbabilityTable, rng: &mut impl Rng) -> &'a str {
    &table.entries()[draw_index(table, rng)].name
}

/// Sample `seed_count` first-tier draws through the whole chain.
///
/// Every continue hit feeds the next tier (`units_per_draw` hits per draw);
/// every other hit is counted in its tier's histogram. Tiers that receive no
/// draws are left out.
pub fn simulate_cascade(
    seed_count: u64,
    chain: &CascadeChain,
    rng: &mut impl Rng,
) -> Vec<TierHistogram> {
    let mut histograms = Vec::with_capacity(chain.depth());
    let mut draws = seed_count;

    for stage in chain.stages() {
        if draws == 0 {
            break;
        }

        let mut hits = vec![0u64; stage.table.len()];
        for _ in 0..draws {
            hits[draw_index(&stage.table, rng)] += 1;
        }

        let continue_index = stage.continue_index();
        let advanced = continue_index.map(|i| hits[i]).unwrap_or(0);
        let next_draws = (advanced as f64 / stage.units_per_draw).floor() as u64;
        let leftover = advanced as f64 - next_draws as f64 * stage.units_per_draw;

        let counts = stage
            .table
            .entries()
            .iter()
            .zip(hits)
            .enumerate()
            .filter(|(i, _)| Some(*i) != continue_index)
            .map(|(_, (entry, count))| OutcomeCount {
                name: entry.name.clone(),
                count,
            })
            .collect();

        histograms.push(TierHistogram {
            stage: stage.name.clone(),
            entered: draws,
            advanced,
            leftover,
            counts,
        });
        draws = next_draws;
    }

    histograms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::CascadeStage;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table() -> ProbabilityTable {
        ProbabilityTable::from_pairs(&[("a", 30.0), ("b", 30.0), ("c", 40.0)]).unwrap()
    }

    #[test]
    fn test_draw_respects_declaration_order() {
        // StepRng(0, 0) always yields 0.0, which must land on the first entry
        let mut rng = StepRng::new(0, 0);
        assert_eq!(draw_one(&table(), &mut rng), "a");
    }

    #[test]
    fn test_draw_max_roll_lands_on_last() {
        // u64::MAX maps to the largest f64 below 1.0
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(draw_one(&table(), &mut rng), "c");
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let table =
            ProbabilityTable::from_pairs(&[("never", 0.0), ("always", 100.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(draw_one(&table, &mut rng), "always");
        }
    }

    #[test]
    fn test_simulate_conserves_draws() {
        let a = ProbabilityTable::from_pairs(&[("x", 50.0), ("up", 50.0)]).unwrap();
        let b = ProbabilityTable::from_pairs(&[("y", 100.0)]).unwrap();
        let chain = CascadeChain::new(vec![
            CascadeStage::new("a", a, "up").unwrap(),
            CascadeStage::terminal("b", b),
        ])
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tiers = simulate_cascade(1000, &chain, &mut rng);

        assert_eq!(tiers[0].entered, 1000);
        assert_eq!(tiers[0].count("x") + tiers[0].advanced, 1000);
        assert_eq!(tiers[0].count("up"), 0);
        assert_eq!(tiers[1].entered, tiers[0].advanced);
        assert_eq!(tiers[1].count("y"), tiers[1].entered);
    }

    #[test]
    fn test_simulate_zero_is_empty() {
        let chain = CascadeChain::single("only", table());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(simulate_cascade(0, &chain, &mut rng).is_empty());
    }
}
