//! Weighted random draws and cascade simulation.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
