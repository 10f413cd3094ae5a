//! Classified cash-flow models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved cash-flow kind. FX rows are always resolved to `FxGain` or
/// `FxLoss`, never left ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowKind {
    Deposit,
    Withdrawal,
    Commission,
    Fee,
    Interest,
    TradeSettlement,
    FxGain,
    FxLoss,
}

impl CashFlowKind {
    pub fn is_fx(&self) -> bool {
        matches!(self, CashFlowKind::FxGain | CashFlowKind::FxLoss)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowKind::Deposit => "DEPOSIT",
            CashFlowKind::Withdrawal => "WITHDRAWAL",
            CashFlowKind::Commission => "COMMISSION",
            CashFlowKind::Fee => "FEE",
            CashFlowKind::Interest => "INTEREST",
            CashFlowKind::TradeSettlement => "TRADE_SETTLEMENT",
            CashFlowKind::FxGain => "FX_GAIN",
            CashFlowKind::FxLoss => "FX_LOSS",
        }
    }
}

/// A cash-flow row with its resolved kind and processing notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedCashFlow {
    pub kind: CashFlowKind,
    pub currency: String,
    /// Foreign-currency amount, when the row carried one.
    pub amount: Option<Decimal>,
    pub amount_base: Decimal,
    /// Matching rate from the statement rate table; `1` for base-currency
    /// rows, `None` when no rate was supplied.
    pub exchange_rate: Option<Decimal>,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Human-readable processing notes (reclassifications, rounding hints).
    pub notes: Vec<String>,
}

/// Output of the cash-flow classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    pub flows: Vec<ClassifiedCashFlow>,
    /// Sum of all base-currency amounts.
    pub total_base: Decimal,
    /// Foreign-currency sums keyed by currency code; rows without a foreign
    /// amount contribute their base amount under the base-currency key.
    pub per_currency: HashMap<String, Decimal>,
    pub warnings: Vec<String>,
}
