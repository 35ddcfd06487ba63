//! Monte Carlo simulation of loot cascades.
//!
//! Samples the same tables the expectation engine resolves, so a report can
//! put sampled counts next to their closed-form expectation.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::run_simulation;
