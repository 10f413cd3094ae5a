//! Strike-adjustment models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statements::OptionRight;

/// A candidate strike adjustment triggered by a special dividend.
///
/// Invariant (enforced by the validator): `new_strike - original_strike`
/// equals `strike_delta` within the 0.001 tolerance, and both strikes are
/// strictly positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedAdjustment {
    pub ticker: String,
    pub option_right: OptionRight,
    pub original_strike: Decimal,
    pub new_strike: Decimal,
    /// Per-share dividend amount that triggered the adjustment.
    pub dividend_amount: Decimal,
    pub strike_delta: Decimal,
}

/// Outcome of validating one adjustment: every failed rule is accumulated,
/// nothing short-circuits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
