//! Profile configuration: JSON files, validation, and the JSON API on top.

use lootbox::api::handle_request;
use lootbox::config::{GachaConfig, STARLIGHT_PROFILE, ZODIAC_PROFILE};
use lootbox::LootError;
use serde_json::Value;
use std::fs;

const CUSTOM_CONFIG: &str = r#"{
  "profiles": [
    {
      "name": "coin",
      "draw_price": 10.0,
      "chain": [
        {
          "name": "flip",
          "table": [
            { "name": "heads", "weight": 50.0 },
            { "name": "tails", "weight": 50.0 }
          ],
          "continue_item": "tails"
        },
        {
          "name": "reflip",
          "table": [{ "name": "edge", "weight": 100.0 }]
        }
      ],
      "bundles": {
        "recipes": [{ "name": "pair", "items": ["heads", "edge"] }],
        "priority": ["pair"]
      }
    }
  ]
}"#;

fn write_config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, body).unwrap();
    (dir, path)
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn test_builtin_profiles() {
    let config = GachaConfig::builtin();
    assert_eq!(config.profile_names(), vec![ZODIAC_PROFILE, STARLIGHT_PROFILE]);
    assert!(config.validate().is_ok());
    assert_eq!(config.profile(ZODIAC_PROFILE).unwrap().draw_price, 27.0);
    assert_eq!(config.profile(STARLIGHT_PROFILE).unwrap().chain.depth(), 5);
}

#[test]
fn test_builtin_survives_json_roundtrip() {
    let config = GachaConfig::builtin();
    let json = serde_json::to_string(&config).unwrap();
    let parsed: GachaConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_custom_profile_with_defaults() {
    let (_dir, path) = write_config(CUSTOM_CONFIG);
    let config = GachaConfig::load(&path).unwrap();
    assert_eq!(config.max_simulation_count, 100_000);

    let coin = config.profile("coin").unwrap();
    assert_eq!(coin.chain.depth(), 2);
    assert_eq!(coin.chain.stages()[0].units_per_draw, 1.0);
    assert!(coin.chain.stages()[1].continue_item.is_none());
}

#[test]
fn test_unknown_profile_is_invalid_input() {
    assert!(matches!(
        GachaConfig::builtin().profile("slots"),
        Err(LootError::InvalidInput(_))
    ));
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn test_weights_must_sum_to_hundred() {
    let body = CUSTOM_CONFIG.replace(r#""weight": 50.0 }"#, r#""weight": 49.0 }"#);
    let (_dir, path) = write_config(&body);
    assert!(GachaConfig::load(&path).is_err());
}

#[test]
fn test_continue_item_must_be_in_table() {
    let body = CUSTOM_CONFIG.replace(r#""continue_item": "tails""#, r#""continue_item": "rim""#);
    let (_dir, path) = write_config(&body);
    assert!(GachaConfig::load(&path).is_err());
}

#[test]
fn test_exchange_rate_below_one_rejected() {
    let body = CUSTOM_CONFIG.replace(
        r#""continue_item": "tails""#,
        r#""continue_item": "tails", "units_per_draw": 0.001"#,
    );
    let (_dir, path) = write_config(&body);
    assert!(GachaConfig::load(&path).is_err());
}

#[test]
fn test_priority_without_recipe_rejected() {
    let body = CUSTOM_CONFIG.replace(r#""priority": ["pair"]"#, r#""priority": ["trio"]"#);
    let (_dir, path) = write_config(&body);
    assert!(matches!(
        GachaConfig::load(&path),
        Err(LootError::Configuration(_))
    ));
}

#[test]
fn test_duplicate_profiles_rejected() {
    let mut config = GachaConfig::builtin();
    config.profiles.push(config.profiles[0].clone());
    assert!(matches!(config.validate(), Err(LootError::Configuration(_))));
}

#[test]
fn test_non_positive_draw_price_rejected() {
    let body = CUSTOM_CONFIG.replace(r#""draw_price": 10.0"#, r#""draw_price": 0.0"#);
    let (_dir, path) = write_config(&body);
    assert!(matches!(
        GachaConfig::load(&path),
        Err(LootError::Configuration(_))
    ));
}

// =========================================================================
// JSON API
// =========================================================================

fn call(config: &GachaConfig, body: &str) -> Value {
    serde_json::from_str(&handle_request(config, body)).unwrap()
}

#[test]
fn test_api_calculate_on_custom_profile() {
    let (_dir, path) = write_config(CUSTOM_CONFIG);
    let config = GachaConfig::load(&path).unwrap();
    let out = call(
        &config,
        r#"{"op":"calculate","profile":"coin","investment":1000,"method":"original",
            "values":{"pair":4.0}}"#,
    );
    // 100 flips: 50 heads, 50 reflips of edge, 50 pairs worth 4 each
    assert!((out["draw_count"].as_f64().unwrap() - 100.0).abs() < 1e-9);
    assert!((out["expected_value"].as_f64().unwrap() - 200.0).abs() < 1e-9);
    assert!((out["roi"].as_f64().unwrap() + 80.0).abs() < 1e-9);
}

#[test]
fn test_api_simulate_is_reproducible() {
    let config = GachaConfig::builtin();
    let body = r#"{"op":"simulate","profile":"starlight","count":500,"seed":42,"start_tier":1}"#;
    assert_eq!(handle_request(&config, body), handle_request(&config, body));
    let out = call(&config, body);
    assert_eq!(out["tiers"][0]["stage"], "Starlight Crystal");
}

#[test]
fn test_api_errors_are_json() {
    let config = GachaConfig::builtin();
    let out = call(&config, "not json");
    assert_eq!(out["error"]["kind"], "bad_request");

    let out = call(
        &config,
        r#"{"op":"calculate","profile":"nope","investment":1,"method":"original"}"#,
    );
    assert_eq!(out["error"]["kind"], "invalid_input");
    assert!(out["error"]["message"].as_str().unwrap().contains("nope"));
}
