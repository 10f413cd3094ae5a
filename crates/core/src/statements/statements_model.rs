//! Raw statement record models.
//!
//! These are the in-memory shapes produced by the statement file readers
//! (external collaborators) and consumed by every classifier. Pure data:
//! each pipeline stage owns what it produces, hands records on by value,
//! and never mutates them after handoff.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::statements::section_classifier::SectionKind;

/// Statement dialect the records were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrokerKind {
    InteractiveBrokers,
    Tastytrade,
}

/// Broker asset category of a traded instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    #[default]
    Stock,
    Option,
    Future,
    Bond,
    Fund,
    Forex,
    Unknown,
}

/// Option right (call/put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    Call,
    Put,
}

/// Cash-flow kind as tagged by the source statement, before classification.
///
/// FX translation rows arrive with whichever of the two FX tags the broker
/// chose; the cash-flow classifier re-derives the correct one from the row
/// description and amount sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceFlowKind {
    Deposit,
    Withdrawal,
    Commission,
    Fee,
    Interest,
    TradeSettlement,
    FxTranslationGain,
    FxTranslationLoss,
}

/// One parsed trade/transaction row, tagged with the section it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub section: SectionKind,
    pub symbol: String,
    /// Underlying symbol for derivatives; equals `symbol` for equities.
    pub underlying: Option<String>,
    pub description: String,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
    pub quantity: Decimal,
    /// Stated per-unit trade price, when the statement carries one.
    pub trade_price: Option<Decimal>,
    pub proceeds: Decimal,
    pub fee: Decimal,
    pub instrument: InstrumentKind,
    pub option_right: Option<OptionRight>,
    pub strike: Option<Decimal>,
    pub expiration: Option<NaiveDate>,
    /// Broker order-group identifier linking legs executed together.
    pub order_group_id: Option<String>,
    /// Broker-specific extras that have no first-class field.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl RawTransaction {
    pub fn is_option(&self) -> bool {
        self.instrument == InstrumentKind::Option
    }

    pub fn is_equity(&self) -> bool {
        matches!(self.instrument, InstrumentKind::Stock | InstrumentKind::Fund)
    }

    /// Underlying symbol, falling back to the instrument symbol.
    pub fn underlying_symbol(&self) -> &str {
        self.underlying.as_deref().unwrap_or(&self.symbol)
    }
}

/// One row of the cash report / statement-of-funds section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRow {
    pub flow_kind: SourceFlowKind,
    pub currency: String,
    /// Amount in the row's own currency, absent for base-currency-only rows.
    pub amount: Option<Decimal>,
    /// Amount converted to the statement base currency by the broker.
    pub amount_base: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// One row of the deposits/withdrawals feed, reported independently of the
/// cash report. Used to reconcile the classifier's own totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashMovementRow {
    pub movement_kind: SourceFlowKind,
    pub currency: String,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// One currency-conversion trade ("GBP.USD" style pair symbol).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForexTradeRow {
    pub pair_symbol: String,
    pub timestamp: DateTime<Utc>,
    /// Signed base-currency quantity; positive buys the base leg.
    pub quantity: Decimal,
    /// Signed quote-currency proceeds; opposite sign to `quantity`.
    pub proceeds: Decimal,
    pub trade_price: Decimal,
    pub commission: Decimal,
}

/// One dividend row, optionally carrying withheld tax.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendRow {
    pub symbol: String,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub tax_withheld: Option<Decimal>,
    /// Per-share dividend amount, when stated. Special (non-ordinary)
    /// dividends drive strike-adjustment detection.
    pub per_share: Option<Decimal>,
    pub description: String,
}

/// One open-position row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub symbol: String,
    pub instrument: InstrumentKind,
    pub currency: String,
    pub quantity: Decimal,
    pub cost_basis: Option<Decimal>,
}

/// One base-currency exchange-rate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateRow {
    pub currency: String,
    /// Units of base currency per one unit of `currency`.
    pub rate: Decimal,
}

/// Why a section was skipped during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    Privacy,
    Unrecognized,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Privacy => super::statements_constants::SKIP_REASON_PRIVACY,
            SkipReason::Unrecognized => super::statements_constants::SKIP_REASON_UNRECOGNIZED,
        }
    }
}

/// Record of a section that was present but not ingested. Only the header
/// and a generic reason survive; row content is discarded at the reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedSection {
    pub header: String,
    pub reason: SkipReason,
}

/// Fully parsed statement, the input of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    pub broker: BrokerKind,
    pub base_currency: String,
    pub trades: Vec<RawTransaction>,
    pub cash_flows: Vec<CashFlowRow>,
    pub cash_movements: Vec<CashMovementRow>,
    pub forex_trades: Vec<ForexTradeRow>,
    pub dividends: Vec<DividendRow>,
    pub positions: Vec<PositionRow>,
    pub exchange_rates: Vec<ExchangeRateRow>,
    pub skipped_sections: Vec<SkippedSection>,
}

impl StatementData {
    /// An empty statement for the given dialect and base currency.
    pub fn new(broker: BrokerKind, base_currency: impl Into<String>) -> Self {
        Self {
            broker,
            base_currency: base_currency.into(),
            trades: Vec::new(),
            cash_flows: Vec::new(),
            cash_movements: Vec::new(),
            forex_trades: Vec::new(),
            dividends: Vec::new(),
            positions: Vec::new(),
            exchange_rates: Vec::new(),
            skipped_sections: Vec::new(),
        }
    }

    /// True when the statement carries no ingestable records at all.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
            && self.cash_flows.is_empty()
            && self.cash_movements.is_empty()
            && self.forex_trades.is_empty()
            && self.dividends.is_empty()
    }
}
