//! Gacha profiles: built-in data and JSON config files.

pub mod data;
pub mod persistence;
pub mod types;

pub use data::*;
pub use persistence::*;
pub use types::*;
