use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cash_flows::{CashFlowClassifier, CashFlowKind};
use crate::statements::{CashFlowRow, CashMovementRow, ExchangeRateRow, SourceFlowKind};

fn flow_row(
    flow_kind: SourceFlowKind,
    currency: &str,
    amount: Option<Decimal>,
    amount_base: Decimal,
    description: &str,
) -> CashFlowRow {
    CashFlowRow {
        flow_kind,
        currency: currency.to_string(),
        amount,
        amount_base,
        description: description.to_string(),
        date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
    }
}

fn movement_row(kind: SourceFlowKind, amount: Decimal) -> CashMovementRow {
    CashMovementRow {
        movement_kind: kind,
        currency: "USD".to_string(),
        amount,
        description: "Wire".to_string(),
        date: Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
    }
}

fn eur_rate() -> Vec<ExchangeRateRow> {
    vec![ExchangeRateRow {
        currency: "EUR".to_string(),
        rate: dec!(1.08),
    }]
}

#[test]
fn test_fx_row_reclassified_from_description() {
    // Tagged as a gain, but the description says "Loss".
    let rows = vec![flow_row(
        SourceFlowKind::FxTranslationGain,
        "EUR",
        Some(dec!(-50)),
        dec!(-45),
        "FX Translation Loss adj",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &eur_rate(), &[]);

    assert_eq!(report.flows[0].kind, CashFlowKind::FxLoss);
    assert!(report.flows[0]
        .notes
        .iter()
        .any(|n| n.contains("reclassified")));
}

#[test]
fn test_untagged_fx_description_classified_by_sign() {
    let rows = vec![
        flow_row(
            SourceFlowKind::TradeSettlement,
            "EUR",
            Some(dec!(20)),
            dec!(21.60),
            "FX Translation on cash balance",
        ),
        flow_row(
            SourceFlowKind::TradeSettlement,
            "EUR",
            Some(dec!(-20)),
            dec!(-21.60),
            "FX Translation on cash balance",
        ),
    ];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &eur_rate(), &[]);

    assert_eq!(report.flows[0].kind, CashFlowKind::FxGain);
    assert_eq!(report.flows[1].kind, CashFlowKind::FxLoss);
}

#[test]
fn test_non_fx_rows_keep_source_kind() {
    let rows = vec![
        flow_row(
            SourceFlowKind::Deposit,
            "USD",
            None,
            dec!(1000),
            "Wire received",
        ),
        flow_row(
            SourceFlowKind::Interest,
            "USD",
            None,
            dec!(1.23),
            "Credit interest",
        ),
    ];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &[]);

    assert_eq!(report.flows[0].kind, CashFlowKind::Deposit);
    assert_eq!(report.flows[1].kind, CashFlowKind::Interest);
}

#[test]
fn test_base_currency_rows_get_rate_one() {
    let rows = vec![flow_row(
        SourceFlowKind::Deposit,
        "USD",
        None,
        dec!(500),
        "Wire received",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &[]);

    assert_eq!(report.flows[0].exchange_rate, Some(Decimal::ONE));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_missing_rate_warns_but_keeps_row() {
    let rows = vec![flow_row(
        SourceFlowKind::Fee,
        "CHF",
        Some(dec!(-10)),
        dec!(-11),
        "Custody fee",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &[]);

    assert_eq!(report.flows.len(), 1);
    assert_eq!(report.flows[0].exchange_rate, None);
    assert!(report.warnings.iter().any(|w| w.contains("CHF")));
}

#[test]
fn test_small_non_fx_amount_noted_as_rounding_artifact() {
    let rows = vec![flow_row(
        SourceFlowKind::TradeSettlement,
        "USD",
        None,
        dec!(0.004),
        "Residual",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &[]);

    assert!(report.flows[0]
        .notes
        .iter()
        .any(|n| n.contains("rounding artifact")));
}

#[test]
fn test_per_currency_breakdown_falls_back_to_base() {
    let rows = vec![
        flow_row(SourceFlowKind::Deposit, "USD", None, dec!(100), "Wire"),
        flow_row(
            SourceFlowKind::Interest,
            "EUR",
            Some(dec!(5)),
            dec!(5.40),
            "Credit interest",
        ),
        flow_row(
            SourceFlowKind::Interest,
            "EUR",
            Some(dec!(3)),
            dec!(3.24),
            "Credit interest",
        ),
    ];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &eur_rate(), &[]);

    assert_eq!(report.per_currency["USD"], dec!(100));
    assert_eq!(report.per_currency["EUR"], dec!(8));
    assert_eq!(report.total_base, dec!(108.64));
}

#[test]
fn test_reconciliation_mismatch_carries_both_figures() {
    let rows = vec![flow_row(
        SourceFlowKind::Deposit,
        "USD",
        None,
        dec!(1000),
        "Wire",
    )];
    let movements = vec![movement_row(SourceFlowKind::Deposit, dec!(900))];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &movements);

    let warning = report
        .warnings
        .iter()
        .find(|w| w.contains("reconciliation"))
        .expect("reconciliation warning");
    assert!(warning.contains("1000"));
    assert!(warning.contains("900"));
}

#[test]
fn test_reconciliation_within_tolerance_is_silent() {
    let rows = vec![flow_row(
        SourceFlowKind::Deposit,
        "USD",
        None,
        dec!(1000),
        "Wire",
    )];
    let movements = vec![movement_row(SourceFlowKind::Deposit, dec!(1000.005))];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &[], &movements);

    assert!(!report.warnings.iter().any(|w| w.contains("reconciliation")));
}

#[test]
fn test_net_fx_effect_is_informational_warning() {
    let rows = vec![flow_row(
        SourceFlowKind::FxTranslationGain,
        "EUR",
        Some(dec!(100)),
        dec!(108),
        "FX Translation Gain",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let report = classifier.classify(&rows, &eur_rate(), &[]);

    assert!(report.warnings.iter().any(|w| w.contains("informational")));
}

#[test]
fn test_integrity_zero_amount_row() {
    let rows = vec![flow_row(
        SourceFlowKind::Fee,
        "USD",
        None,
        Decimal::ZERO,
        "Empty",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let findings = classifier.check_integrity(&rows);

    assert_eq!(findings.len(), 1);
    assert!(findings[0].contains("zero amount"));
}

#[test]
fn test_integrity_zero_base_with_foreign_amount() {
    let rows = vec![flow_row(
        SourceFlowKind::Fee,
        "EUR",
        Some(dec!(-10)),
        Decimal::ZERO,
        "Custody fee",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let findings = classifier.check_integrity(&rows);

    assert!(findings[0].contains("data loss"));
}

#[test]
fn test_integrity_implausible_fx_ratio() {
    // 10 EUR reported as 1200 USD implies a ratio of 120.
    let rows = vec![flow_row(
        SourceFlowKind::Interest,
        "EUR",
        Some(dec!(10)),
        dec!(1200),
        "Credit interest",
    )];
    let classifier = CashFlowClassifier::new("USD");

    let findings = classifier.check_integrity(&rows);

    assert!(findings[0].contains("unit error"));
}

#[test]
fn test_integrity_clean_rows_report_nothing() {
    let rows = vec![flow_row(
        SourceFlowKind::Interest,
        "EUR",
        Some(dec!(10)),
        dec!(10.80),
        "Credit interest",
    )];
    let classifier = CashFlowClassifier::new("USD");

    assert!(classifier.check_integrity(&rows).is_empty());
}
