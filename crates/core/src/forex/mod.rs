//! Forex processing - pair parsing, per-trade rates, exposure netting.

mod forex_model;
mod forex_service;


pub use forex_model::{ForexPairInfo, ProcessedForexTrade};
pub use forex_service::ForexProcessor;
