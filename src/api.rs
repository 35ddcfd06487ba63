//! JSON request/response layer shared by the CLI and the web server.

use crate::calculator::{compute_expectation, ExpectationRequest};
use crate::config::GachaConfig;
use crate::error::{LootError, Result};
use crate::simulator::{run_simulation, SimConfig};
use crate::value::ItemValues;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    Calculate {
        profile: String,
        investment: f64,
        method: String,
        #[serde(default)]
        discount: f64,
        #[serde(default)]
        values: ItemValues,
        #[serde(default = "default_true")]
        expand: bool,
    },
    Simulate {
        profile: String,
        count: u64,
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default)]
        start_tier: usize,
        #[serde(default)]
        first_tier_only: bool,
    },
    Profiles,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub draw_price: f64,
    pub stages: Vec<String>,
    pub bundles: Vec<String>,
}

/// Execute one request against `config`.
pub fn dispatch(config: &GachaConfig, request: ApiRequest) -> Result<Value> {
    match request {
        ApiRequest::Calculate {
            profile,
            investment,
            method,
            discount,
            values,
            expand,
        } => {
            let profile = config.profile(&profile)?;
            let request = ExpectationRequest {
                investment,
                method: method.parse()?,
                discount,
                item_values: values,
                expand,
            };
            let report = compute_expectation(profile, &request)?;
            Ok(serde_json::to_value(report)?)
        }
        ApiRequest::Simulate {
            profile,
            count,
            seed,
            start_tier,
            first_tier_only,
        } => {
            let profile = config.profile(&profile)?;
            let sim = SimConfig {
                count,
                seed,
                max_count: config.max_simulation_count,
                start_tier,
                first_tier_only,
                verbosity: 0,
            };
            let report = run_simulation(&profile.chain, &sim)?;
            Ok(serde_json::to_value(report)?)
        }
        ApiRequest::Profiles => {
            let summaries: Vec<ProfileSummary> = config
                .profiles
                .iter()
                .map(|p| ProfileSummary {
                    name: p.name.clone(),
                    draw_price: p.draw_price,
                    stages: p.chain.stages().iter().map(|s| s.name.clone()).collect(),
                    bundles: p.bundles.priority.clone(),
                })
                .collect();
            Ok(serde_json::to_value(summaries)?)
        }
    }
}

pub fn error_body(err: &LootError) -> Value {
    json!({ "error": { "kind": err.kind(), "message": err.to_string() } })
}

/// Parse a JSON request body, run it, and return the JSON response body.
/// Failures are reported inside the body, never as a panic.
pub fn handle_request(config: &GachaConfig, body: &str) -> String {
    let result = serde_json::from_str::<ApiRequest>(body)
        .map_err(LootError::from)
        .and_then(|request| dispatch(config, request));

    let value = match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(kind = err.kind(), "request failed: {err}");
            error_body(&err)
        }
    };
    value.to_string()
}
