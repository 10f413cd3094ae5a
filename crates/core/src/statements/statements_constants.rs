//! Section header vocabulary for the supported statement dialects.
//!
//! Interactive-Brokers-style activity statements label sections with title
//! rows ("Trades", "Cash Report", ...); Tastytrade-style exports use their
//! own vocabulary for the same content. Both map onto one section kind set.

// Trade sections
pub const SECTION_TRADES: &str = "Trades";
pub const SECTION_TRANSACTIONS: &str = "Transactions";

// Cash sections
pub const SECTION_CASH_REPORT: &str = "Cash Report";
pub const SECTION_STATEMENT_OF_FUNDS: &str = "Statement of Funds";
pub const SECTION_DEPOSITS_WITHDRAWALS: &str = "Deposits & Withdrawals";
pub const SECTION_MONEY_MOVEMENT: &str = "Money Movement";

// Income sections
pub const SECTION_DIVIDENDS: &str = "Dividends";
pub const SECTION_WITHHOLDING_TAX: &str = "Withholding Tax";
pub const SECTION_INTEREST: &str = "Interest";

// Charges
pub const SECTION_FEES: &str = "Fees";
pub const SECTION_COMMISSIONS: &str = "Commission Details";

// Portfolio state
pub const SECTION_OPEN_POSITIONS: &str = "Open Positions";
pub const SECTION_POSITIONS: &str = "Positions";
pub const SECTION_EXCHANGE_RATES: &str = "Base Currency Exchange Rate";
pub const SECTION_CORPORATE_ACTIONS: &str = "Corporate Actions";
pub const SECTION_FOREX_BALANCES: &str = "Forex Balances";

// Privacy-sensitive sections. Row content from these must never be copied
// into output, logs, or error messages.
pub const SECTION_ACCOUNT_INFORMATION: &str = "Account Information";
pub const SECTION_NET_ASSET_VALUE: &str = "Net Asset Value";
pub const SECTION_CUSTOMER_ASSET_LOCATION: &str = "Location of Customer Assets";
pub const SECTION_LEGAL_NOTES: &str = "Legal Notes";
pub const SECTION_NOTES: &str = "Notes/Legal Notes";

/// Generic reason recorded for a privacy skip. Intentionally content-free.
pub const SKIP_REASON_PRIVACY: &str = "privacy-sensitive section";

/// Reason tag for sections the classifier does not recognize. Distinct from
/// the privacy reason so diagnostics can tell "intentionally excluded" from
/// "unrecognized format".
pub const SKIP_REASON_UNRECOGNIZED: &str = "unrecognized section";
