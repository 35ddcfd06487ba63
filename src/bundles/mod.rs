//! Greedy bundle completion over expected inventories.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
