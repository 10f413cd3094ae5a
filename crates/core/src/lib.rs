//! Tradewind Core - Broker statement classification and conversion.
//!
//! This crate normalizes heterogeneous broker activity statements
//! (Interactive-Brokers-style and Tastytrade-style CSV exports, already
//! parsed into in-memory records) into a broker-agnostic domain model.
//! It is storage-agnostic: currency and ticker identities are resolved
//! through traits implemented by the persistence layer.

pub mod adjustments;
pub mod cash_flows;
pub mod constants;
pub mod conversion;
pub mod errors;
pub mod forex;
pub mod statements;
pub mod strategies;
pub mod utils;

// Re-export common types from the statement and conversion modules
pub use conversion::*;
pub use statements::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
