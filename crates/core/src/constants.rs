//! Shared constants for the statement pipeline.
//!
//! The tolerance values are part of the observable contract: reconciliation
//! and validation results are defined in terms of these exact epsilons.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Default reporting currency when a statement does not state one.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Tolerance for currency-amount comparisons (reconciliation, net FX).
pub const AMOUNT_TOLERANCE: Decimal = dec!(0.01);

/// Tolerance for strike-delta arithmetic in adjustment validation.
pub const STRIKE_DELTA_TOLERANCE: Decimal = dec!(0.001);

/// Tolerance for effective-rate drift against the stated forex trade price.
pub const FX_RATE_DRIFT_TOLERANCE: Decimal = dec!(0.0001);

/// Lower bound of the plausible implied FX ratio between a foreign amount
/// and its base-currency amount. Ratios outside the band point at unit errors.
pub const FX_RATIO_LOWER_BOUND: Decimal = dec!(0.1);

/// Upper bound of the plausible implied FX ratio.
pub const FX_RATIO_UPPER_BOUND: Decimal = dec!(10.0);

/// Commission above this fraction of the quote notional is flagged.
pub const COMMISSION_WARNING_RATIO: Decimal = dec!(0.01);

/// Strike adjustments larger than this fraction of the original strike are
/// flagged for human review (warning only).
pub const LARGE_ADJUSTMENT_RATIO: Decimal = dec!(0.05);

/// Separator between the base and quote codes of a currency-pair symbol
/// ("GBP.USD").
pub const PAIR_SEPARATOR: char = '.';

/// Forex trades dated further than this many hours in the future are flagged
/// by the trade-list integrity check.
pub const FUTURE_TRADE_HOURS: i64 = 24;
