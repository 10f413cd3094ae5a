//! Statement section classification and privacy validation.
//!
//! Every section title in a statement export maps to exactly one
//! disposition: a known section kind, a privacy skip, or an unknown skip.
//! Privacy-skipped sections must never have row content copied anywhere;
//! only the header and a generic reason may be surfaced.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::statements::statements_constants::*;
use crate::statements::statements_errors::StatementError;
use crate::statements::statements_model::StatementData;

/// Section kinds the pipeline ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionKind {
    Trades,
    ForexTrades,
    CashReport,
    DepositsWithdrawals,
    Dividends,
    WithholdingTax,
    Interest,
    Fees,
    OpenPositions,
    ExchangeRates,
    CorporateActions,
}

/// Outcome of classifying a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDisposition {
    /// The section feeds the pipeline.
    Known(SectionKind),
    /// The section is intentionally excluded; its content is sensitive.
    PrivacySkip,
    /// The section is not part of the supported vocabulary.
    UnknownSkip,
}

/// Maps a raw section header to its disposition.
///
/// Matching is exact after trimming; broker exports repeat the header
/// verbatim on every row of a section, so no fuzzy matching is needed.
pub fn classify_section(header: &str) -> SectionDisposition {
    let header = header.trim();

    let kind = match header {
        SECTION_TRADES | SECTION_TRANSACTIONS => Some(SectionKind::Trades),
        SECTION_FOREX_BALANCES => Some(SectionKind::ForexTrades),
        SECTION_CASH_REPORT | SECTION_STATEMENT_OF_FUNDS => Some(SectionKind::CashReport),
        SECTION_DEPOSITS_WITHDRAWALS | SECTION_MONEY_MOVEMENT => {
            Some(SectionKind::DepositsWithdrawals)
        }
        SECTION_DIVIDENDS => Some(SectionKind::Dividends),
        SECTION_WITHHOLDING_TAX => Some(SectionKind::WithholdingTax),
        SECTION_INTEREST => Some(SectionKind::Interest),
        SECTION_FEES | SECTION_COMMISSIONS => Some(SectionKind::Fees),
        SECTION_OPEN_POSITIONS | SECTION_POSITIONS => Some(SectionKind::OpenPositions),
        SECTION_EXCHANGE_RATES => Some(SectionKind::ExchangeRates),
        SECTION_CORPORATE_ACTIONS => Some(SectionKind::CorporateActions),
        _ => None,
    };

    if let Some(kind) = kind {
        return SectionDisposition::Known(kind);
    }

    match header {
        SECTION_ACCOUNT_INFORMATION
        | SECTION_NET_ASSET_VALUE
        | SECTION_CUSTOMER_ASSET_LOCATION
        | SECTION_LEGAL_NOTES
        | SECTION_NOTES => SectionDisposition::PrivacySkip,
        _ => SectionDisposition::UnknownSkip,
    }
}

lazy_static! {
    /// Account-number-shaped tokens: the IB "U1234567" account format and
    /// bare runs of 8+ digits as brokers print masked account ids.
    static ref ACCOUNT_NUMBER_RE: Regex =
        Regex::new(r"\bU\d{7,8}\b|\b\d{8,12}\b").expect("valid account-number regex");
}

/// Re-scans a parsed statement for account-number-shaped tokens in fields
/// that reach output, and fails if any is found.
///
/// The returned error names only the offending field, never its content.
pub fn validate_statement_privacy(data: &StatementData) -> Result<(), StatementError> {
    for (idx, trade) in data.trades.iter().enumerate() {
        if ACCOUNT_NUMBER_RE.is_match(&trade.description) {
            return Err(StatementError::PrivacyViolation(format!(
                "trade row {} description contains an account-number-shaped token",
                idx
            )));
        }
        if ACCOUNT_NUMBER_RE.is_match(&trade.symbol) {
            return Err(StatementError::PrivacyViolation(format!(
                "trade row {} symbol contains an account-number-shaped token",
                idx
            )));
        }
    }
    for (idx, flow) in data.cash_flows.iter().enumerate() {
        if ACCOUNT_NUMBER_RE.is_match(&flow.description) {
            return Err(StatementError::PrivacyViolation(format!(
                "cash flow row {} description contains an account-number-shaped token",
                idx
            )));
        }
    }
    for (idx, dividend) in data.dividends.iter().enumerate() {
        if ACCOUNT_NUMBER_RE.is_match(&dividend.description) {
            return Err(StatementError::PrivacyViolation(format!(
                "dividend row {} description contains an account-number-shaped token",
                idx
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::statements_model::{BrokerKind, DividendRow};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_known_sections() {
        assert_eq!(
            classify_section("Trades"),
            SectionDisposition::Known(SectionKind::Trades)
        );
        assert_eq!(
            classify_section("Cash Report"),
            SectionDisposition::Known(SectionKind::CashReport)
        );
        assert_eq!(
            classify_section("Deposits & Withdrawals"),
            SectionDisposition::Known(SectionKind::DepositsWithdrawals)
        );
    }

    #[test]
    fn test_tastytrade_vocabulary_maps_to_same_kinds() {
        assert_eq!(
            classify_section("Transactions"),
            SectionDisposition::Known(SectionKind::Trades)
        );
        assert_eq!(
            classify_section("Money Movement"),
            SectionDisposition::Known(SectionKind::DepositsWithdrawals)
        );
    }

    #[test]
    fn test_privacy_sections_are_skipped() {
        assert_eq!(
            classify_section("Account Information"),
            SectionDisposition::PrivacySkip
        );
        assert_eq!(
            classify_section("Net Asset Value"),
            SectionDisposition::PrivacySkip
        );
        assert_eq!(
            classify_section("Location of Customer Assets"),
            SectionDisposition::PrivacySkip
        );
    }

    #[test]
    fn test_unknown_section_gets_distinct_disposition() {
        assert_eq!(
            classify_section("Borrow Fee Details"),
            SectionDisposition::UnknownSkip
        );
    }

    #[test]
    fn test_header_is_trimmed() {
        assert_eq!(
            classify_section("  Trades  "),
            SectionDisposition::Known(SectionKind::Trades)
        );
    }

    #[test]
    fn test_privacy_scan_flags_account_token() {
        let mut data = StatementData::new(BrokerKind::InteractiveBrokers, "USD");
        data.dividends.push(DividendRow {
            symbol: "AAPL".to_string(),
            currency: "USD".to_string(),
            date: Utc::now(),
            amount: dec!(10),
            tax_withheld: None,
            per_share: None,
            description: "Payment to account U1234567".to_string(),
        });

        let err = validate_statement_privacy(&data).unwrap_err();
        let message = err.to_string();
        // The field is named, the token itself never appears.
        assert!(message.contains("dividend row 0"));
        assert!(!message.contains("U1234567"));
    }

    #[test]
    fn test_privacy_scan_passes_clean_statement() {
        let data = StatementData::new(BrokerKind::Tastytrade, "USD");
        assert!(validate_statement_privacy(&data).is_ok());
    }
}
