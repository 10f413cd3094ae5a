//! Forex trade models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A parsed currency pair.
///
/// Valid only when both codes are exactly three alphabetic characters.
/// Invalid input never raises; it yields an unparsed result so downstream
/// code can choose to skip or flag it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexPairInfo {
    /// The pair text as it appeared in the statement.
    pub raw: String,
    pub base: String,
    pub quote: String,
    pub is_valid: bool,
}

impl ForexPairInfo {
    pub(crate) fn invalid(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            base: String::new(),
            quote: String::new(),
            is_valid: false,
        }
    }
}

/// A forex trade with derived rate, notionals, and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedForexTrade {
    pub pair: ForexPairInfo,
    /// "Buy GBP with USD" / "Sell GBP for USD", from the quantity sign.
    pub direction: String,
    /// |proceeds / quantity|, or the stated trade price at zero quantity.
    pub effective_rate: Decimal,
    /// Absolute base-currency notional.
    pub base_currency_amount: Decimal,
    /// Absolute quote-currency notional.
    pub quote_currency_amount: Decimal,
    pub diagnostics: Vec<String>,
}
