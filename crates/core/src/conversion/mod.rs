//! Domain conversion - maps classified statement records into the
//! broker-agnostic persistence model.

mod conversion_errors;
mod conversion_model;
mod conversion_service;
mod conversion_traits;


pub use conversion_errors::ConversionError;
pub use conversion_model::{
    ConversionBatch, ConversionReport, Dividend, DividendTax, Movement, MovementType, OptionTrade,
    StockTrade, TradeCode, TradeDirection,
};
pub use conversion_service::StatementConverter;
pub use conversion_traits::{CurrencyResolverTrait, TickerResolverTrait};
