use thiserror::Error;

/// Errors raised by the domain converter.
///
/// `Cancelled` is the only variant expected in normal operation; resolver
/// failures are handled per record and surface as report errors, not here.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Conversion cancelled")]
    Cancelled,

    #[error("Could not resolve currency '{0}'")]
    UnresolvedCurrency(String),

    #[error("Could not resolve ticker '{0}'")]
    UnresolvedTicker(String),

    #[error("Cannot derive a price for {symbol}: no stated price and zero quantity")]
    UnderivablePrice { symbol: String },

    #[error("Cannot derive a trade direction for {symbol}: zero quantity")]
    UnderivableDirection { symbol: String },

    #[error("Resolver error: {0}")]
    Resolver(String),
}
