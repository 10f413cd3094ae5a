//! Broker-agnostic persistence models.
//!
//! Every record in a batch references resolved currency/ticker identifiers,
//! never a sentinel or unset id.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statements::OptionRight;
use crate::strategies::StrategyKind;

/// Target movement-type enumeration for cash records.
///
/// `TradeSettlement` is kept as its own variant instead of being collapsed
/// into `Deposit`: settlement of trade proceeds is not new money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Deposit,
    Withdrawal,
    Fee,
    InterestGained,
    Conversion,
    TradeSettlement,
    FxGain,
    FxLoss,
}

/// Long/short, derived purely from the sign of quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    Long,
    Short,
}

/// Trade code, derived purely from the sign of quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeCode {
    BuyToOpen,
    SellToClose,
}

/// A converted cash movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub currency_id: i64,
    pub movement_type: MovementType,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A converted equity trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTrade {
    pub ticker_id: i64,
    pub currency_id: i64,
    pub timestamp: DateTime<Utc>,
    /// Absolute quantity; the sign lives in `direction`/`code`.
    pub quantity: Decimal,
    pub price: Decimal,
    pub fee: Decimal,
    pub direction: TradeDirection,
    pub code: TradeCode,
}

/// A converted option trade with its detected strategy context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTrade {
    pub ticker_id: i64,
    pub currency_id: i64,
    pub timestamp: DateTime<Utc>,
    pub option_right: OptionRight,
    pub strike: Decimal,
    pub expiration: NaiveDate,
    pub quantity: Decimal,
    pub price: Decimal,
    pub fee: Decimal,
    pub direction: TradeDirection,
    pub code: TradeCode,
    pub strategy: StrategyKind,
}

/// A converted dividend payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub ticker_id: i64,
    pub currency_id: i64,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

/// Withheld tax on a dividend payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendTax {
    pub ticker_id: i64,
    pub currency_id: i64,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

/// The consolidated output of one statement conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionBatch {
    /// Correlation identifier for resumable imports.
    pub session_id: String,
    pub account_id: String,
    pub movements: Vec<Movement>,
    pub stock_trades: Vec<StockTrade>,
    pub option_trades: Vec<OptionTrade>,
    pub dividends: Vec<Dividend>,
    pub dividend_taxes: Vec<DividendTax>,
}

impl ConversionBatch {
    pub fn new(session_id: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            account_id: account_id.into(),
            movements: Vec::new(),
            stock_trades: Vec::new(),
            option_trades: Vec::new(),
            dividends: Vec::new(),
            dividend_taxes: Vec::new(),
        }
    }

    pub fn record_count(&self) -> usize {
        self.movements.len()
            + self.stock_trades.len()
            + self.option_trades.len()
            + self.dividends.len()
            + self.dividend_taxes.len()
    }
}

/// Batch plus the accumulated human-readable diagnostics.
///
/// The strings are meant for logging/UI display; tests should assert on
/// presence/count/keywords, not exact wording.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub batch: ConversionBatch,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}
