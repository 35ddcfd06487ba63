//! Currency to points conversion.

use crate::core::constants::CARD_READER_BONUS;
use crate::error::{LootError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the points were bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseMethod {
    /// Discounted point card: investment / discount, rounded
    Card,
    /// Card reader: 5% bonus points
    CardReader,
    /// Face value
    Original,
    /// Discounted gift: investment / discount, rounded
    Gift,
}

impl PurchaseMethod {
    pub const ALL: [PurchaseMethod; 4] = [
        PurchaseMethod::Card,
        PurchaseMethod::CardReader,
        PurchaseMethod::Original,
        PurchaseMethod::Gift,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PurchaseMethod::Card => "card",
            PurchaseMethod::CardReader => "cardreader",
            PurchaseMethod::Original => "original",
            PurchaseMethod::Gift => "gift",
        }
    }

    pub fn needs_discount(&self) -> bool {
        matches!(self, PurchaseMethod::Card | PurchaseMethod::Gift)
    }
}

impl fmt::Display for PurchaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PurchaseMethod {
    type Err = LootError;

    /// Unknown methods are rejected rather than priced at face value.
    fn from_str(s: &str) -> Result<Self> {
        PurchaseMethod::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                LootError::invalid(format!(
                    "unknown purchase method '{s}' (expected card, cardreader, original or gift)"
                ))
            })
    }
}

/// Points obtained for `investment` through `method`.
pub fn calculate_points(investment: f64, method: PurchaseMethod, discount: f64) -> Result<f64> {
    if !investment.is_finite() || investment <= 0.0 {
        return Err(LootError::invalid(format!(
            "investment must be positive, got {investment}"
        )));
    }

    match method {
        PurchaseMethod::Card | PurchaseMethod::Gift => {
            if !discount.is_finite() || discount <= 0.0 {
                return Err(LootError::invalid(format!(
                    "method '{method}' needs a positive discount, got {discount}"
                )));
            }
            Ok((investment / discount).round())
        }
        PurchaseMethod::CardReader => Ok(investment * CARD_READER_BONUS),
        PurchaseMethod::Original => Ok(investment),
    }
}
