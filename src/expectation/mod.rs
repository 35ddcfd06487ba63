//! Closed-form expectation over probability tables and cascades.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
