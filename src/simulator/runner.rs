//! Simulation runner: seeds the RNG, samples the cascade, and pairs the
//! sample with its closed-form expectation.

use super::config::SimConfig;
use super::report::SimReport;
use crate::error::Result;
use crate::expectation::{resolve_cascade, survival_probability};
use crate::sampler::simulate_cascade;
use crate::tables::CascadeChain;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run the simulation and return a report.
pub fn run_simulation(chain: &CascadeChain, config: &SimConfig) -> Result<SimReport> {
    config.validate()?;
    let chain = config.scoped_chain(chain)?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    if config.verbosity >= 1 {
        tracing::info!(
            count = config.count,
            seed = ?config.seed,
            stages = chain.depth(),
            "running simulation"
        );
    }

    let tiers = simulate_cascade(config.count, &chain, &mut rng);
    let expected = resolve_cascade(config.count as f64, &chain)?;

    if config.verbosity >= 2 {
        for tier in &tiers {
            tracing::info!(
                stage = %tier.stage,
                entered = tier.entered,
                advanced = tier.advanced,
                "tier sampled"
            );
        }
    }

    Ok(SimReport::new(
        config,
        &chain,
        tiers,
        expected.tiers,
        survival_probability(&chain),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{starlight_chain, zodiac_profile};

    #[test]
    fn test_seeded_runs_repeat() {
        let config = SimConfig::default().with_seed(99);
        let a = run_simulation(&starlight_chain(), &config).unwrap();
        let b = run_simulation(&starlight_chain(), &config).unwrap();
        assert_eq!(a.tiers, b.tiers);
    }

    #[test]
    fn test_single_table_report() {
        let config = SimConfig {
            count: 500,
            ..SimConfig::default().with_seed(3)
        };
        let report = run_simulation(&zodiac_profile().chain, &config).unwrap();
        assert_eq!(report.tiers.len(), 1);
        assert_eq!(report.tiers[0].terminal_total(), 500);
    }

    #[test]
    fn test_over_limit_rejected() {
        let config = SimConfig {
            count: 11,
            max_count: 10,
            ..Default::default()
        };
        assert!(run_simulation(&starlight_chain(), &config).is_err());
    }
}
