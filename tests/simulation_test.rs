//! Monte Carlo cascade sampling and simulation reports.

use lootbox::config::{starlight_chain, starlight_ladder, zodiac_profile};
use lootbox::core::constants::MAX_SIMULATION_COUNT;
use lootbox::sampler::simulate_cascade;
use lootbox::simulator::{run_simulation, SimConfig};
use lootbox::tables::{CascadeChain, CascadeStage, ProbabilityTable};
use lootbox::LootError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_same_seed_same_json() {
    let config = SimConfig::default().with_seed(42);
    let a = run_simulation(&starlight_chain(), &config).unwrap();
    let b = run_simulation(&starlight_chain(), &config).unwrap();
    assert_eq!(a.to_json(), b.to_json());
}

#[test]
fn test_different_seeds_differ() {
    let chain = zodiac_profile().chain;
    let a = run_simulation(&chain, &SimConfig::default().with_seed(1)).unwrap();
    let b = run_simulation(&chain, &SimConfig::default().with_seed(2)).unwrap();
    assert_ne!(a.to_json(), b.to_json());
}

#[test]
fn test_zero_count_is_empty() {
    let config = SimConfig {
        count: 0,
        ..Default::default()
    };
    let report = run_simulation(&starlight_chain(), &config).unwrap();
    assert!(report.tiers.is_empty());
    assert!(report.expected.is_empty());
    assert_eq!(report.actual_survival, 0.0);
}

#[test]
fn test_count_limit_boundary() {
    // Single-table chain keeps the max-size run quick
    let chain = zodiac_profile().chain;
    let at_limit = SimConfig {
        count: MAX_SIMULATION_COUNT,
        seed: Some(3),
        ..Default::default()
    };
    let report = run_simulation(&chain, &at_limit).unwrap();
    assert_eq!(report.tiers[0].entered, MAX_SIMULATION_COUNT);

    let over = SimConfig {
        count: MAX_SIMULATION_COUNT + 1,
        ..at_limit
    };
    assert!(matches!(
        run_simulation(&chain, &over),
        Err(LootError::InvalidInput(_))
    ));
}

#[test]
fn test_sample_converges_to_expectation() {
    let chain = zodiac_profile().chain;
    let config = SimConfig {
        count: MAX_SIMULATION_COUNT,
        seed: Some(7),
        ..Default::default()
    };
    let report = run_simulation(&chain, &config).unwrap();
    let tier = &report.tiers[0];

    for entry in chain.first().table.entries() {
        let sampled = tier.count(&entry.name) as f64 / config.count as f64 * 100.0;
        assert!(
            (sampled - entry.weight).abs() < 1.0,
            "{} sampled at {sampled}% vs {}%",
            entry.name,
            entry.weight
        );
    }
}

#[test]
fn test_every_draw_lands_somewhere() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let tiers = simulate_cascade(5000, &starlight_ladder(), &mut rng);

    for (i, tier) in tiers.iter().enumerate() {
        assert_eq!(tier.terminal_total() + tier.advanced, tier.entered);
        if let Some(next) = tiers.get(i + 1) {
            assert_eq!(next.entered, tier.advanced);
        }
    }
}

#[test]
fn test_exchange_rate_leaves_leftover() {
    let first = ProbabilityTable::from_pairs(&[("shard", 100.0)]).unwrap();
    let second = ProbabilityTable::from_pairs(&[("crown", 100.0)]).unwrap();
    let chain = CascadeChain::new(vec![
        CascadeStage::new("shards", first, "shard")
            .unwrap()
            .with_units_per_draw(4.0)
            .unwrap(),
        CascadeStage::terminal("crowns", second),
    ])
    .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let tiers = simulate_cascade(10, &chain, &mut rng);
    assert_eq!(tiers[0].advanced, 10);
    assert_eq!(tiers[1].entered, 2);
    assert_eq!(tiers[0].leftover, 2.0);
}

#[test]
fn test_ladder_survival_close_to_theory() {
    let config = SimConfig {
        count: 80_000,
        seed: Some(99),
        ..Default::default()
    };
    let report = run_simulation(&starlight_ladder(), &config).unwrap();
    assert!((report.theoretical_survival - 12.5).abs() < 1e-9);
    assert!((report.actual_survival - 12.5).abs() < 1.0);
}

#[test]
fn test_ladder_config_starts_at_crystal() {
    let report = run_simulation(&starlight_chain(), &SimConfig::ladder(100).with_seed(5)).unwrap();
    assert_eq!(report.tiers[0].stage, "Starlight Crystal");
    assert_eq!(report.tiers[0].entered, 100);
    assert_eq!(report.stages, 4);
}

#[test]
fn test_first_tier_only_reports_continue_item() {
    let report =
        run_simulation(&starlight_chain(), &SimConfig::first_tier(2000).with_seed(8)).unwrap();
    assert_eq!(report.tiers.len(), 1);
    assert!(report.tiers[0].count("Exquisite Starlight") > 0);
}

#[test]
fn test_every_tier_converges_to_expectation() {
    let count = 80_000;
    let config = SimConfig {
        count,
        seed: Some(21),
        ..Default::default()
    };
    let report = run_simulation(&starlight_ladder(), &config).unwrap();
    assert_eq!(report.tiers.len(), report.expected.len());

    for (i, tier) in report.tiers.iter().enumerate() {
        for outcome in &tier.counts {
            let sampled = outcome.count as f64 / count as f64;
            let expected = report.expected_count(i, &outcome.name) / count as f64;
            assert!(
                (sampled - expected).abs() < 0.005,
                "tier {i} {}: {sampled} vs {expected}",
                outcome.name
            );
        }
    }
}

#[test]
fn test_no_tier_exceeds_requested_count() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let count = 2000;
    for tier in simulate_cascade(count, &starlight_chain(), &mut rng) {
        assert!(tier.entered <= count, "{} entered {}", tier.stage, tier.entered);
    }
}
