//! Forex processing service.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::constants::{
    COMMISSION_WARNING_RATIO, FUTURE_TRADE_HOURS, FX_RATE_DRIFT_TOLERANCE, PAIR_SEPARATOR,
};
use crate::forex::forex_model::{ForexPairInfo, ProcessedForexTrade};
use crate::statements::ForexTradeRow;

/// Processes the forex trades of a single statement.
#[derive(Debug, Default)]
pub struct ForexProcessor;

impl ForexProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parses "GBP.USD"-style pair notation.
    ///
    /// Any shape other than two three-letter alphabetic tokens around a
    /// single separator yields an invalid result, never an error.
    pub fn parse_pair(&self, text: &str) -> ForexPairInfo {
        let tokens: Vec<&str> = text.split(PAIR_SEPARATOR).collect();
        if tokens.len() != 2 {
            return ForexPairInfo::invalid(text);
        }

        let base = tokens[0].trim().to_uppercase();
        let quote = tokens[1].trim().to_uppercase();
        if !is_currency_code(&base) || !is_currency_code(&quote) {
            return ForexPairInfo::invalid(text);
        }

        ForexPairInfo {
            raw: text.to_string(),
            base,
            quote,
            is_valid: true,
        }
    }

    /// Derives the conversion direction, effective rate, notionals, and
    /// per-trade diagnostics.
    pub fn process_trade(&self, trade: &ForexTradeRow) -> ProcessedForexTrade {
        let pair = self.parse_pair(&trade.pair_symbol);
        let mut diagnostics = Vec::new();

        if !pair.is_valid {
            diagnostics.push(format!("Unparseable currency pair '{}'", trade.pair_symbol));
        }

        let direction = if pair.is_valid {
            if trade.quantity >= Decimal::ZERO {
                format!("Buy {} with {}", pair.base, pair.quote)
            } else {
                format!("Sell {} for {}", pair.base, pair.quote)
            }
        } else {
            String::new()
        };

        let effective_rate = if trade.quantity.is_zero() {
            trade.trade_price
        } else {
            (trade.proceeds / trade.quantity).abs()
        };

        if !trade.trade_price.is_zero()
            && (effective_rate - trade.trade_price).abs() > FX_RATE_DRIFT_TOLERANCE
        {
            diagnostics.push(format!(
                "Effective rate {} diverges from stated trade price {}",
                effective_rate, trade.trade_price
            ));
        }

        let quote_currency_amount = trade.proceeds.abs();
        if !quote_currency_amount.is_zero()
            && trade.commission.abs() > quote_currency_amount * COMMISSION_WARNING_RATIO
        {
            diagnostics.push(format!(
                "Commission {} exceeds 1% of quote notional {}",
                trade.commission.abs(),
                quote_currency_amount
            ));
        }

        ProcessedForexTrade {
            pair,
            direction,
            effective_rate,
            base_currency_amount: trade.quantity.abs(),
            quote_currency_amount,
            diagnostics,
        }
    }

    /// Nets currency exposure across all valid-pair trades.
    ///
    /// A positive quantity contributes +base/−quote; a negative quantity the
    /// opposite. Invalid-pair trades are left out of the netting.
    pub fn net_exposure(&self, trades: &[ForexTradeRow]) -> HashMap<String, Decimal> {
        let mut exposure: HashMap<String, Decimal> = HashMap::new();

        for trade in trades {
            let pair = self.parse_pair(&trade.pair_symbol);
            if !pair.is_valid {
                continue;
            }

            if trade.quantity >= Decimal::ZERO {
                *exposure.entry(pair.base).or_default() += trade.quantity.abs();
                *exposure.entry(pair.quote).or_default() -= trade.proceeds.abs();
            } else {
                *exposure.entry(pair.base).or_default() -= trade.quantity.abs();
                *exposure.entry(pair.quote).or_default() += trade.proceeds.abs();
            }
        }

        exposure
    }

    /// Trade-list data-quality checks. Flagged trades are kept.
    pub fn check_integrity(&self, trades: &[ForexTradeRow]) -> Vec<String> {
        let mut findings = Vec::new();
        let future_cutoff = Utc::now() + Duration::hours(FUTURE_TRADE_HOURS);

        for (idx, trade) in trades.iter().enumerate() {
            if trade.quantity.is_zero() {
                findings.push(format!("Forex trade {} has zero quantity", idx));
            } else {
                if trade.proceeds.is_zero() {
                    findings.push(format!(
                        "Forex trade {} has zero proceeds despite a quantity of {}",
                        idx, trade.quantity
                    ));
                }
                if trade.trade_price.is_zero() {
                    findings.push(format!(
                        "Forex trade {} has a zero trade price despite a quantity of {}",
                        idx, trade.quantity
                    ));
                }
            }

            if trade.timestamp > future_cutoff {
                findings.push(format!(
                    "Forex trade {} is dated {} (more than 24 hours in the future)",
                    idx,
                    trade.timestamp.format("%Y-%m-%d %H:%M")
                ));
            }
        }

        findings
    }
}

fn is_currency_code(token: &str) -> bool {
    token.len() == 3 && token.chars().all(|c| c.is_ascii_alphabetic())
}
