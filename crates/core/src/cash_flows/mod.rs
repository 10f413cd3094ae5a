//! Cash-flow classification - FX gain/loss resolution, per-currency
//! breakdown, and reconciliation against the deposits/withdrawals feed.

mod cash_flows_model;
mod cash_flows_service;

#[cfg(test)]
mod cash_flows_service_tests;

pub use cash_flows_model::{CashFlowKind, CashFlowReport, ClassifiedCashFlow};
pub use cash_flows_service::CashFlowClassifier;
