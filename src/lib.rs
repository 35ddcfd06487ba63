//! Lootbox - gacha expected value calculator and cascade simulator.
//!
//! This module exposes the engine for the CLI, the web API and tests.

pub mod api;
pub mod build_info;
pub mod bundles;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod expectation;
pub mod purchase;
pub mod sampler;
pub mod simulator;
pub mod tables;
pub mod value;
pub mod web;

pub use error::{LootError, Result};
