//! Statement-to-domain conversion service.
//!
//! The converter drives the full classification pipeline over one parsed
//! statement and maps every classified record into the persistence model.
//! Per-record failures are logged with the record's key fields and excluded
//! from the batch; a single bad record never aborts the statement. The only
//! suspension points are the external currency/ticker resolution calls,
//! awaited sequentially per record so get-or-create side effects keep a
//! deterministic order.

use log::{debug, error};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::adjustments::AdjustmentValidator;
use crate::cash_flows::{CashFlowClassifier, CashFlowKind, ClassifiedCashFlow};
use crate::constants::AMOUNT_TOLERANCE;
use crate::conversion::conversion_errors::ConversionError;
use crate::conversion::conversion_model::{
    ConversionBatch, ConversionReport, Dividend, DividendTax, Movement, MovementType, OptionTrade,
    StockTrade, TradeCode, TradeDirection,
};
use crate::conversion::conversion_traits::{CurrencyResolverTrait, TickerResolverTrait};
use crate::forex::ForexProcessor;
use crate::statements::{
    validate_statement_privacy, InstrumentKind, RawTransaction, SourceFlowKind, StatementData,
};
use crate::strategies::{StrategyDetector, StrategyKind};
use crate::utils::CancellationToken;
use crate::Result;

/// Per-run memo of resolved identifiers, so each code/symbol is resolved
/// exactly once per statement.
#[derive(Default)]
struct ResolverCache {
    currencies: HashMap<String, i64>,
    tickers: HashMap<String, i64>,
}

/// Converts classified statements into broker-agnostic batches.
pub struct StatementConverter {
    currency_resolver: Arc<dyn CurrencyResolverTrait>,
    ticker_resolver: Arc<dyn TickerResolverTrait>,
}

impl StatementConverter {
    pub fn new(
        currency_resolver: Arc<dyn CurrencyResolverTrait>,
        ticker_resolver: Arc<dyn TickerResolverTrait>,
    ) -> Self {
        Self {
            currency_resolver,
            ticker_resolver,
        }
    }

    /// Converts one statement into a [`ConversionBatch`].
    ///
    /// The cancellation token is checked before each record group, never
    /// mid-record. When `session_id` is `None` a fresh one is generated.
    pub async fn convert(
        &self,
        data: &StatementData,
        account_id: &str,
        session_id: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<ConversionReport> {
        if data.is_empty() {
            return Err(crate::statements::StatementError::Malformed(
                "statement contains no ingestable records".to_string(),
            )
            .into());
        }
        validate_statement_privacy(data)?;

        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut batch = ConversionBatch::new(session_id, account_id);
        let mut warnings = Vec::new();
        let mut errors = Vec::new();
        let mut cache = ResolverCache::default();

        for section in &data.skipped_sections {
            warnings.push(format!(
                "Skipped section '{}' ({})",
                section.header,
                section.reason.as_str()
            ));
        }

        // Classification runs over the complete record set before any
        // conversion: reconciliation totals and exposure netting need it all.
        let classifier = CashFlowClassifier::new(&data.base_currency);
        let cash_report =
            classifier.classify(&data.cash_flows, &data.exchange_rates, &data.cash_movements);
        warnings.extend(cash_report.warnings.iter().cloned());
        warnings.extend(classifier.check_integrity(&data.cash_flows));

        let forex = ForexProcessor::new();
        warnings.extend(forex.check_integrity(&data.forex_trades));

        let detector = StrategyDetector::new();
        let groups = detector.detect(&data.trades);
        warnings.extend(detector.validate_groups(&groups));

        let adjustment_validator = AdjustmentValidator::new();
        let candidates = adjustment_validator.detect_adjustments(&data.trades, &data.dividends);
        for candidate in &candidates {
            let validation = adjustment_validator.validate(candidate);
            for note in validation.errors.iter().chain(validation.warnings.iter()) {
                warnings.push(format!(
                    "Strike adjustment {} ({:?}): {}",
                    candidate.ticker, candidate.option_right, note
                ));
            }
        }
        let adjustments = adjustment_validator.validate_and_filter(candidates);
        debug!(
            "{} strike adjustment(s) passed validation",
            adjustments.len()
        );

        // Cash movements.
        ensure_live(cancel)?;
        if !cash_report.flows.is_empty() {
            for flow in &cash_report.flows {
                if let Err(err) = self.convert_cash_flow(flow, &mut cache, &mut batch).await {
                    error!(
                        "Failed to convert {} cash flow of {} {} dated {}: {}",
                        flow.kind.as_str(),
                        flow.amount_base,
                        flow.currency,
                        flow.date.format("%Y-%m-%d"),
                        err
                    );
                    errors.push(format!(
                        "Cash flow ({} {} {}) dropped: {}",
                        flow.kind.as_str(),
                        flow.amount_base,
                        flow.currency,
                        err
                    ));
                }
            }
        } else {
            // No cash report section: fall back to the deposits/withdrawals
            // feed so the statement's cash activity is still captured.
            for movement in &data.cash_movements {
                if let Err(err) = self.convert_cash_movement(movement, &mut cache, &mut batch).await
                {
                    error!(
                        "Failed to convert cash movement of {} {} dated {}: {}",
                        movement.amount,
                        movement.currency,
                        movement.date.format("%Y-%m-%d"),
                        err
                    );
                    errors.push(format!(
                        "Cash movement ({} {}) dropped: {}",
                        movement.amount, movement.currency, err
                    ));
                }
            }
        }

        // Forex trades.
        ensure_live(cancel)?;
        for trade in &data.forex_trades {
            let processed = forex.process_trade(trade);
            warnings.extend(processed.diagnostics.iter().cloned());

            if !processed.pair.is_valid {
                errors.push(format!(
                    "Forex trade '{}' dropped: unparseable currency pair",
                    trade.pair_symbol
                ));
                continue;
            }

            match self.currency_id(&mut cache, &processed.pair.quote).await {
                Ok(currency_id) => batch.movements.push(Movement {
                    currency_id,
                    movement_type: MovementType::Conversion,
                    amount: trade.proceeds,
                    date: trade.timestamp,
                    notes: Some(processed.direction.clone()),
                }),
                Err(err) => {
                    error!(
                        "Failed to convert forex trade '{}' dated {}: {}",
                        trade.pair_symbol,
                        trade.timestamp.format("%Y-%m-%d"),
                        err
                    );
                    errors.push(format!(
                        "Forex trade '{}' dropped: {}",
                        trade.pair_symbol, err
                    ));
                }
            }
        }

        // Stock trades. Non-equity, non-option instruments are excluded from
        // the trade list without error; they are not yet modeled.
        ensure_live(cancel)?;
        let mut excluded = 0usize;
        for trade in &data.trades {
            match trade.instrument {
                InstrumentKind::Stock | InstrumentKind::Fund => {
                    if let Err(err) = self.convert_stock_trade(trade, &mut cache, &mut batch).await
                    {
                        error!(
                            "Failed to convert trade {} ({} x {}): {}",
                            trade.symbol, trade.quantity, trade.currency, err
                        );
                        errors.push(format!("Trade {} dropped: {}", trade.symbol, err));
                    }
                }
                InstrumentKind::Option => {} // converted from strategy groups below
                _ => excluded += 1,
            }
        }
        if excluded > 0 {
            debug!("{} non-equity trade(s) excluded from the trade list", excluded);
        }

        // Option trades, carrying their group's strategy.
        ensure_live(cancel)?;
        for group in &groups {
            let strategy = group.strategy.unwrap_or(StrategyKind::Unknown);
            for leg in group.legs.iter().filter(|l| l.is_option()) {
                if let Err(err) = self
                    .convert_option_trade(leg, strategy, &mut cache, &mut batch)
                    .await
                {
                    error!(
                        "Failed to convert option trade {} ({} x {}): {}",
                        leg.symbol, leg.quantity, leg.currency, err
                    );
                    errors.push(format!("Option trade {} dropped: {}", leg.symbol, err));
                }
            }
        }

        // Dividends and withholding tax.
        ensure_live(cancel)?;
        for dividend in &data.dividends {
            if let Err(err) = self.convert_dividend(dividend, &mut cache, &mut batch).await {
                error!(
                    "Failed to convert dividend for {} ({} {}): {}",
                    dividend.symbol, dividend.amount, dividend.currency, err
                );
                errors.push(format!(
                    "Dividend for {} dropped: {}",
                    dividend.symbol, err
                ));
            }
        }

        debug!(
            "Converted statement into {} record(s) with {} warning(s), {} error(s)",
            batch.record_count(),
            warnings.len(),
            errors.len()
        );

        Ok(ConversionReport {
            batch,
            warnings,
            errors,
        })
    }

    async fn convert_cash_flow(
        &self,
        flow: &ClassifiedCashFlow,
        cache: &mut ResolverCache,
        batch: &mut ConversionBatch,
    ) -> std::result::Result<(), ConversionError> {
        let currency_id = self.currency_id(cache, &flow.currency).await?;
        let amount = flow.amount.unwrap_or(flow.amount_base);
        let notes = if flow.notes.is_empty() {
            None
        } else {
            Some(flow.notes.join("; "))
        };

        batch.movements.push(Movement {
            currency_id,
            movement_type: map_flow_kind(flow.kind),
            amount,
            date: flow.date,
            notes,
        });
        Ok(())
    }

    async fn convert_cash_movement(
        &self,
        movement: &crate::statements::CashMovementRow,
        cache: &mut ResolverCache,
        batch: &mut ConversionBatch,
    ) -> std::result::Result<(), ConversionError> {
        let currency_id = self.currency_id(cache, &movement.currency).await?;

        batch.movements.push(Movement {
            currency_id,
            movement_type: map_source_kind(movement.movement_kind, movement.amount),
            amount: movement.amount,
            date: movement.date,
            notes: None,
        });
        Ok(())
    }

    async fn convert_stock_trade(
        &self,
        trade: &RawTransaction,
        cache: &mut ResolverCache,
        batch: &mut ConversionBatch,
    ) -> std::result::Result<(), ConversionError> {
        let (direction, code) = derive_direction(trade)?;
        let price = derive_price(trade)?;
        let ticker_id = self.ticker_id(cache, &trade.symbol).await?;
        let currency_id = self.currency_id(cache, &trade.currency).await?;

        batch.stock_trades.push(StockTrade {
            ticker_id,
            currency_id,
            timestamp: trade.timestamp,
            quantity: trade.quantity.abs(),
            price,
            fee: trade.fee,
            direction,
            code,
        });
        Ok(())
    }

    async fn convert_option_trade(
        &self,
        leg: &RawTransaction,
        strategy: StrategyKind,
        cache: &mut ResolverCache,
        batch: &mut ConversionBatch,
    ) -> std::result::Result<(), ConversionError> {
        let (Some(option_right), Some(strike), Some(expiration)) =
            (leg.option_right, leg.strike, leg.expiration)
        else {
            return Err(ConversionError::Resolver(format!(
                "option contract fields missing on {}",
                leg.symbol
            )));
        };
        let (direction, code) = derive_direction(leg)?;
        let price = derive_price(leg)?;
        let ticker_id = self.ticker_id(cache, leg.underlying_symbol()).await?;
        let currency_id = self.currency_id(cache, &leg.currency).await?;

        batch.option_trades.push(OptionTrade {
            ticker_id,
            currency_id,
            timestamp: leg.timestamp,
            option_right,
            strike,
            expiration,
            quantity: leg.quantity.abs(),
            price,
            fee: leg.fee,
            direction,
            code,
            strategy,
        });
        Ok(())
    }

    async fn convert_dividend(
        &self,
        dividend: &crate::statements::DividendRow,
        cache: &mut ResolverCache,
        batch: &mut ConversionBatch,
    ) -> std::result::Result<(), ConversionError> {
        let ticker_id = self.ticker_id(cache, &dividend.symbol).await?;
        let currency_id = self.currency_id(cache, &dividend.currency).await?;

        batch.dividends.push(Dividend {
            ticker_id,
            currency_id,
            amount: dividend.amount,
            date: dividend.date,
        });

        if let Some(tax) = dividend.tax_withheld {
            if tax.abs() > AMOUNT_TOLERANCE {
                batch.dividend_taxes.push(DividendTax {
                    ticker_id,
                    currency_id,
                    amount: tax,
                    date: dividend.date,
                });
            }
        }
        Ok(())
    }

    async fn currency_id(
        &self,
        cache: &mut ResolverCache,
        code: &str,
    ) -> std::result::Result<i64, ConversionError> {
        if let Some(id) = cache.currencies.get(code) {
            return Ok(*id);
        }
        let id = self.currency_resolver.get_or_create_currency_id(code).await?;
        cache.currencies.insert(code.to_string(), id);
        Ok(id)
    }

    async fn ticker_id(
        &self,
        cache: &mut ResolverCache,
        symbol: &str,
    ) -> std::result::Result<i64, ConversionError> {
        if let Some(id) = cache.tickers.get(symbol) {
            return Ok(*id);
        }
        let id = self.ticker_resolver.get_or_create_ticker_id(symbol).await?;
        cache.tickers.insert(symbol.to_string(), id);
        Ok(id)
    }
}

fn ensure_live(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(ConversionError::Cancelled.into());
    }
    Ok(())
}

/// Exhaustive mapping from resolved flow kinds to the target movement types.
/// Adding a flow kind is a compile-time-visible change here.
fn map_flow_kind(kind: CashFlowKind) -> MovementType {
    match kind {
        CashFlowKind::Deposit => MovementType::Deposit,
        CashFlowKind::Withdrawal => MovementType::Withdrawal,
        CashFlowKind::Commission => {
            // Best guess: the target model has no separate commission type.
            debug!("Mapping COMMISSION cash flow to FEE movement");
            MovementType::Fee
        }
        CashFlowKind::Fee => MovementType::Fee,
        CashFlowKind::Interest => MovementType::InterestGained,
        CashFlowKind::TradeSettlement => MovementType::TradeSettlement,
        CashFlowKind::FxGain => MovementType::FxGain,
        CashFlowKind::FxLoss => MovementType::FxLoss,
    }
}

/// Mapping for the deposits/withdrawals feed fallback path.
fn map_source_kind(kind: SourceFlowKind, amount: Decimal) -> MovementType {
    match kind {
        SourceFlowKind::Deposit => MovementType::Deposit,
        SourceFlowKind::Withdrawal => MovementType::Withdrawal,
        SourceFlowKind::Commission => MovementType::Fee,
        SourceFlowKind::Fee => MovementType::Fee,
        SourceFlowKind::Interest => MovementType::InterestGained,
        SourceFlowKind::TradeSettlement => MovementType::TradeSettlement,
        SourceFlowKind::FxTranslationGain | SourceFlowKind::FxTranslationLoss => {
            if amount >= Decimal::ZERO {
                MovementType::FxGain
            } else {
                MovementType::FxLoss
            }
        }
    }
}

/// Trade direction and code, derived purely from the sign of quantity.
fn derive_direction(
    trade: &RawTransaction,
) -> std::result::Result<(TradeDirection, TradeCode), ConversionError> {
    if trade.quantity > Decimal::ZERO {
        Ok((TradeDirection::Long, TradeCode::BuyToOpen))
    } else if trade.quantity < Decimal::ZERO {
        Ok((TradeDirection::Short, TradeCode::SellToClose))
    } else {
        Err(ConversionError::UnderivableDirection {
            symbol: trade.symbol.clone(),
        })
    }
}

/// Stated trade price when present, else |proceeds / quantity|.
fn derive_price(trade: &RawTransaction) -> std::result::Result<Decimal, ConversionError> {
    if let Some(price) = trade.trade_price {
        return Ok(price);
    }
    if trade.quantity.is_zero() {
        return Err(ConversionError::UnderivablePrice {
            symbol: trade.symbol.clone(),
        });
    }
    Ok((trade.proceeds / trade.quantity).abs())
}
