//! Strike-adjustment detection and validation.
//!
//! A special (non-ordinary) dividend mechanically lowers the strike of open
//! option contracts by the per-share amount. Detection pairs option strikes
//! seen on the same underlying/right/expiration whose difference matches a
//! dividend's per-share amount; validation is an accumulating rule fold.

use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::adjustments::adjustments_model::{AdjustmentValidation, DetectedAdjustment};
use crate::constants::{LARGE_ADJUSTMENT_RATIO, STRIKE_DELTA_TOLERANCE};
use crate::statements::{DividendRow, OptionRight, RawTransaction};

/// Detects and validates strike adjustments.
#[derive(Debug, Default)]
pub struct AdjustmentValidator;

impl AdjustmentValidator {
    pub fn new() -> Self {
        Self
    }

    /// Scans option transactions for strike pairs whose difference matches a
    /// special dividend's per-share amount.
    ///
    /// Candidates are raw detections; run them through
    /// [`validate_and_filter`](Self::validate_and_filter) before use.
    pub fn detect_adjustments(
        &self,
        transactions: &[RawTransaction],
        dividends: &[DividendRow],
    ) -> Vec<DetectedAdjustment> {
        let per_share_amounts: Vec<(&str, Decimal)> = dividends
            .iter()
            .filter_map(|d| d.per_share.map(|amount| (d.symbol.as_str(), amount)))
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .collect();
        if per_share_amounts.is_empty() {
            return Vec::new();
        }

        // Strikes per (underlying, right, expiration), in deterministic order.
        let mut contracts: BTreeMap<(String, String, String), Vec<(Decimal, OptionRight)>> =
            BTreeMap::new();
        for tx in transactions.iter().filter(|t| t.is_option()) {
            let (Some(right), Some(strike), Some(expiration)) =
                (tx.option_right, tx.strike, tx.expiration)
            else {
                continue;
            };
            let key = (
                tx.underlying_symbol().to_string(),
                format!("{:?}", right),
                expiration.to_string(),
            );
            let strikes = contracts.entry(key).or_default();
            if !strikes.iter().any(|(s, _)| *s == strike) {
                strikes.push((strike, right));
            }
        }

        let mut candidates = Vec::new();
        for ((underlying, _, _), strikes) in &contracts {
            let Some((_, dividend_amount)) = per_share_amounts
                .iter()
                .find(|(symbol, _)| *symbol == underlying.as_str())
            else {
                continue;
            };

            for (original, right) in strikes {
                for (adjusted, _) in strikes {
                    if adjusted >= original {
                        continue;
                    }
                    let delta = adjusted - original;
                    if (delta.abs() - dividend_amount).abs() < STRIKE_DELTA_TOLERANCE {
                        candidates.push(DetectedAdjustment {
                            ticker: underlying.clone(),
                            option_right: *right,
                            original_strike: *original,
                            new_strike: *adjusted,
                            dividend_amount: *dividend_amount,
                            strike_delta: delta,
                        });
                    }
                }
            }
        }

        debug!(
            "Detected {} strike-adjustment candidate(s) from {} dividend row(s)",
            candidates.len(),
            dividends.len()
        );
        candidates
    }

    /// Runs every rule and accumulates all failures; never short-circuits.
    pub fn validate(&self, adjustment: &DetectedAdjustment) -> AdjustmentValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if adjustment.original_strike <= Decimal::ZERO {
            errors.push(format!(
                "Original strike must be positive, got {}",
                adjustment.original_strike
            ));
        }
        if adjustment.new_strike <= Decimal::ZERO {
            errors.push(format!(
                "New strike must be positive, got {}",
                adjustment.new_strike
            ));
        }
        if adjustment.dividend_amount < Decimal::ZERO {
            errors.push(format!(
                "Dividend amount must not be negative, got {}",
                adjustment.dividend_amount
            ));
        }

        let expected_delta = adjustment.new_strike - adjustment.original_strike;
        if (expected_delta - adjustment.strike_delta).abs() >= STRIKE_DELTA_TOLERANCE {
            errors.push(format!(
                "Stated strike delta {} does not match {} - {} = {}",
                adjustment.strike_delta,
                adjustment.new_strike,
                adjustment.original_strike,
                expected_delta
            ));
        }

        // Warning only: flag for human review, not an automatic rejection.
        if adjustment.original_strike > Decimal::ZERO
            && adjustment.strike_delta.abs()
                > adjustment.original_strike * LARGE_ADJUSTMENT_RATIO
        {
            warnings.push(format!(
                "Adjustment of {} exceeds 5% of the original strike {}",
                adjustment.strike_delta, adjustment.original_strike
            ));
        }

        AdjustmentValidation {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Validates every candidate, logs each rejection or flag with its
    /// ticker/option-right context, and returns the candidates that passed
    /// every blocking rule. Flagged-but-valid adjustments are retained.
    pub fn validate_and_filter(
        &self,
        adjustments: Vec<DetectedAdjustment>,
    ) -> Vec<DetectedAdjustment> {
        let mut retained = Vec::with_capacity(adjustments.len());

        for adjustment in adjustments {
            let validation = self.validate(&adjustment);

            for warning in &validation.warnings {
                warn!(
                    "Strike adjustment for {} {:?}: {}",
                    adjustment.ticker, adjustment.option_right, warning
                );
            }

            if validation.is_valid {
                retained.push(adjustment);
            } else {
                warn!(
                    "Rejected strike adjustment for {} {:?}: {}",
                    adjustment.ticker,
                    adjustment.option_right,
                    validation.errors.join("; ")
                );
            }
        }

        retained
    }
}
