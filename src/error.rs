//! Error types shared by the engine, calculator and simulator.

use thiserror::Error;

/// Everything that can go wrong while computing or simulating loot outcomes.
#[derive(Debug, Error)]
pub enum LootError {
    /// The caller passed a value outside the accepted range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Static configuration (tables, chains, bundle books) is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LootError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        LootError::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        LootError::Configuration(msg.into())
    }

    /// Short machine-readable tag, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            LootError::InvalidInput(_) => "invalid_input",
            LootError::Configuration(_) => "configuration",
            LootError::Io(_) => "io",
            LootError::Json(_) => "bad_request",
        }
    }
}

pub type Result<T> = std::result::Result<T, LootError>;
