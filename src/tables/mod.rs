//! Probability tables and cascade chains.

pub mod types;

pub use types::*;
