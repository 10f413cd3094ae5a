//! Property-based integration tests for the classification pipeline.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use tradewind_core::adjustments::{AdjustmentValidator, DetectedAdjustment};
use tradewind_core::cash_flows::CashFlowClassifier;
use tradewind_core::statements::{
    CashFlowRow, InstrumentKind, OptionRight, RawTransaction, SectionKind, SourceFlowKind,
};
use tradewind_core::strategies::StrategyDetector;

// =============================================================================
// Generators
// =============================================================================

/// Generates an amount with two decimal places in a plausible range.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Generates a strictly positive strike with two decimal places.
fn arb_strike() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_source_kind() -> impl Strategy<Value = SourceFlowKind> {
    prop_oneof![
        Just(SourceFlowKind::Deposit),
        Just(SourceFlowKind::Withdrawal),
        Just(SourceFlowKind::Commission),
        Just(SourceFlowKind::Fee),
        Just(SourceFlowKind::Interest),
        Just(SourceFlowKind::TradeSettlement),
        Just(SourceFlowKind::FxTranslationGain),
        Just(SourceFlowKind::FxTranslationLoss),
    ]
}

fn arb_option_right() -> impl Strategy<Value = OptionRight> {
    prop_oneof![Just(OptionRight::Call), Just(OptionRight::Put)]
}

fn arb_cash_flow_row() -> impl Strategy<Value = CashFlowRow> {
    (arb_source_kind(), arb_amount(), "[a-z ]{0,30}").prop_map(|(kind, amount_base, description)| {
        CashFlowRow {
            flow_kind: kind,
            currency: "USD".to_string(),
            amount: None,
            amount_base,
            description,
            date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
        }
    })
}

fn arb_cash_flow_rows(max_count: usize) -> impl Strategy<Value = Vec<CashFlowRow>> {
    proptest::collection::vec(arb_cash_flow_row(), 0..=max_count)
}

fn arb_option_transaction() -> impl Strategy<Value = RawTransaction> {
    (
        arb_option_right(),
        arb_strike(),
        proptest::option::of(0usize..4),
    )
        .prop_map(|(right, strike, group)| RawTransaction {
            section: SectionKind::Trades,
            symbol: format!("SPY C{}", strike),
            underlying: Some("SPY".to_string()),
            description: "option".to_string(),
            currency: "USD".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap(),
            quantity: Decimal::ONE,
            trade_price: Some(Decimal::ONE),
            proceeds: Decimal::NEGATIVE_ONE,
            fee: Decimal::ZERO,
            instrument: InstrumentKind::Option,
            option_right: Some(right),
            strike: Some(strike),
            expiration: NaiveDate::from_ymd_opt(2024, 6, 21),
            order_group_id: group.map(|g| format!("group-{}", g)),
            metadata: None,
        })
}

fn arb_option_transactions(max_count: usize) -> impl Strategy<Value = Vec<RawTransaction>> {
    proptest::collection::vec(arb_option_transaction(), 0..=max_count)
}

fn arb_adjustment() -> impl Strategy<Value = DetectedAdjustment> {
    (arb_strike(), arb_strike(), arb_amount(), arb_amount()).prop_map(
        |(original, new, dividend, delta)| DetectedAdjustment {
            ticker: "KO".to_string(),
            option_right: OptionRight::Call,
            original_strike: original,
            new_strike: new,
            dividend_amount: dividend,
            strike_delta: delta,
        },
    )
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Classification never drops or invents rows, and the base total is the
    /// plain sum of the base amounts.
    #[test]
    fn prop_classifier_preserves_rows_and_total(
        rows in arb_cash_flow_rows(50)
    ) {
        let classifier = CashFlowClassifier::new("USD");
        let report = classifier.classify(&rows, &[], &[]);

        prop_assert_eq!(report.flows.len(), rows.len());

        let expected_total: Decimal = rows.iter().map(|r| r.amount_base).sum();
        prop_assert_eq!(report.total_base, expected_total);
    }

    /// Rows tagged with either FX translation kind always resolve to an FX
    /// kind; the ambiguity is never passed through.
    #[test]
    fn prop_fx_tagged_rows_resolve_to_fx(
        rows in arb_cash_flow_rows(50)
    ) {
        let classifier = CashFlowClassifier::new("USD");
        let report = classifier.classify(&rows, &[], &[]);

        for (row, flow) in rows.iter().zip(&report.flows) {
            let tagged_fx = matches!(
                row.flow_kind,
                SourceFlowKind::FxTranslationGain | SourceFlowKind::FxTranslationLoss
            );
            if tagged_fx {
                prop_assert!(flow.kind.is_fx());
            }
        }
    }

    /// Base-currency rows always carry an exchange rate of exactly one.
    #[test]
    fn prop_base_currency_rate_is_one(
        rows in arb_cash_flow_rows(30)
    ) {
        let classifier = CashFlowClassifier::new("USD");
        let report = classifier.classify(&rows, &[], &[]);

        for flow in &report.flows {
            prop_assert_eq!(flow.exchange_rate, Some(Decimal::ONE));
        }
    }

    /// Detection is total: every group leaves classified, and no leg is lost
    /// or duplicated in the grouping.
    #[test]
    fn prop_strategy_detection_is_total_and_conserves_legs(
        transactions in arb_option_transactions(40)
    ) {
        let detector = StrategyDetector::new();
        let groups = detector.detect(&transactions);

        prop_assert!(groups.iter().all(|g| g.strategy.is_some()));

        let total_legs: usize = groups.iter().map(|g| g.legs.len()).sum();
        prop_assert_eq!(total_legs, transactions.len());
    }

    /// Legs inside every detected group are in time order.
    #[test]
    fn prop_group_legs_are_time_ordered(
        transactions in arb_option_transactions(40)
    ) {
        let detector = StrategyDetector::new();
        let groups = detector.detect(&transactions);

        for group in &groups {
            for pair in group.legs.windows(2) {
                prop_assert!(pair[0].timestamp <= pair[1].timestamp);
            }
        }
    }

    /// An adjustment is valid exactly when the rule fold produced no errors;
    /// warnings never affect validity.
    #[test]
    fn prop_adjustment_validity_matches_errors(
        adjustment in arb_adjustment()
    ) {
        let validator = AdjustmentValidator::new();
        let result = validator.validate(&adjustment);

        prop_assert_eq!(result.is_valid, result.errors.is_empty());
    }

    /// Filtering retains exactly the candidates that validate.
    #[test]
    fn prop_filter_retains_exactly_the_valid(
        adjustments in proptest::collection::vec(arb_adjustment(), 0..=20)
    ) {
        let validator = AdjustmentValidator::new();
        let expected = adjustments
            .iter()
            .filter(|a| validator.validate(a).is_valid)
            .count();

        let retained = validator.validate_and_filter(adjustments);

        prop_assert_eq!(retained.len(), expected);
    }
}
