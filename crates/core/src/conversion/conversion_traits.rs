//! External directory seams for currency and ticker identity.
//!
//! Implemented by the persistence layer. Both calls must be idempotent:
//! repeated calls with the same code/symbol return the same identifier. The
//! pipeline serializes its own calls per statement but provides no
//! cross-statement locking; concurrent imports are safe only if the
//! implementation guarantees idempotent creation (unique constraint plus
//! retry-on-conflict read, or equivalent).

use async_trait::async_trait;

use crate::conversion::conversion_errors::ConversionError;

/// Resolves an ISO currency code to a stable identifier, creating the entry
/// on first sight.
#[async_trait]
pub trait CurrencyResolverTrait: Send + Sync {
    async fn get_or_create_currency_id(&self, code: &str) -> Result<i64, ConversionError>;
}

/// Resolves a ticker symbol to a stable identifier, creating the entry on
/// first sight.
#[async_trait]
pub trait TickerResolverTrait: Send + Sync {
    async fn get_or_create_ticker_id(&self, symbol: &str) -> Result<i64, ConversionError>;
}
