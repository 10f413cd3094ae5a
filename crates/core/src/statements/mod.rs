//! Statements module - raw statement records, section classification, privacy.

mod section_classifier;
mod statements_constants;
mod statements_errors;
mod statements_model;

pub use section_classifier::{
    classify_section, validate_statement_privacy, SectionDisposition, SectionKind,
};
pub use statements_constants::*;
pub use statements_errors::StatementError;
pub use statements_model::{
    BrokerKind, CashFlowRow, CashMovementRow, DividendRow, ExchangeRateRow, ForexTradeRow,
    InstrumentKind, OptionRight, PositionRow, RawTransaction, SkipReason, SkippedSection,
    SourceFlowKind, StatementData,
};
