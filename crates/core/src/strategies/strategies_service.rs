//! Strategy detection service.
//!
//! Classification is a fixed decision table over leg counts and attribute
//! distinctness, not a scored classifier: ties and unexpected shapes resolve
//! to `Unknown`, never to a guessed strategy.

use std::collections::{BTreeMap, HashSet};

use crate::statements::{OptionRight, RawTransaction};
use crate::strategies::strategies_model::{StrategyGroup, StrategyKind};

/// Groups order-linked transactions and classifies each group.
#[derive(Debug, Default)]
pub struct StrategyDetector;

impl StrategyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Groups transactions by order-group identifier (ungrouped transactions
    /// become individual legs) and classifies every group. Total: every
    /// group leaves with exactly one strategy kind.
    pub fn detect(&self, transactions: &[RawTransaction]) -> Vec<StrategyGroup> {
        // BTreeMap keeps group ordering deterministic across runs.
        let mut grouped: BTreeMap<String, Vec<RawTransaction>> = BTreeMap::new();
        let mut ungrouped: Vec<RawTransaction> = Vec::new();

        for tx in transactions {
            match &tx.order_group_id {
                Some(id) => grouped.entry(id.clone()).or_default().push(tx.clone()),
                None => ungrouped.push(tx.clone()),
            }
        }

        let mut groups = Vec::with_capacity(grouped.len() + ungrouped.len());
        for (id, legs) in grouped {
            let mut group = StrategyGroup::new(Some(id), legs);
            group.strategy = Some(classify_group(&group.legs));
            groups.push(group);
        }
        for leg in ungrouped {
            let mut group = StrategyGroup::new(None, vec![leg]);
            group.strategy = Some(classify_group(&group.legs));
            groups.push(group);
        }

        groups
    }

    /// Flags groups whose legs span more than one underlying or currency.
    ///
    /// Such groupings usually indicate a broker export quirk rather than a
    /// true multi-leg strategy; they are reported, never rejected.
    pub fn validate_groups(&self, groups: &[StrategyGroup]) -> Vec<String> {
        let mut warnings = Vec::new();

        for group in groups {
            let Some(id) = &group.order_group_id else {
                continue;
            };

            let underlyings: HashSet<&str> = group
                .legs
                .iter()
                .map(|leg| leg.underlying_symbol())
                .collect();
            if underlyings.len() > 1 {
                warnings.push(format!(
                    "Order group {} spans {} underlyings (likely a broker export quirk)",
                    id,
                    underlyings.len()
                ));
            }

            let currencies: HashSet<&str> =
                group.legs.iter().map(|leg| leg.currency.as_str()).collect();
            if currencies.len() > 1 {
                warnings.push(format!(
                    "Order group {} mixes {} currencies (likely a broker export quirk)",
                    id,
                    currencies.len()
                ));
            }
        }

        warnings
    }
}

/// The fixed decision table of recognized strategy shapes.
fn classify_group(legs: &[RawTransaction]) -> StrategyKind {
    let option_legs: Vec<&RawTransaction> = legs.iter().filter(|l| l.is_option()).collect();
    let equity_legs = legs.len() - option_legs.len();

    // The decision table only names all-option groups; anything carrying an
    // equity leg resolves to Unknown.
    if equity_legs > 0 {
        return StrategyKind::Unknown;
    }

    let calls = option_legs
        .iter()
        .filter(|l| l.option_right == Some(OptionRight::Call))
        .count();
    let puts = option_legs
        .iter()
        .filter(|l| l.option_right == Some(OptionRight::Put))
        .count();

    let distinct_strikes: HashSet<String> = option_legs
        .iter()
        .filter_map(|l| l.strike.map(|s| s.normalize().to_string()))
        .collect();
    let distinct_expirations: HashSet<_> =
        option_legs.iter().filter_map(|l| l.expiration).collect();

    match option_legs.len() {
        1 => StrategyKind::SingleLeg,
        2 => {
            if calls == 1 && puts == 1 {
                match distinct_strikes.len() {
                    1 => StrategyKind::Straddle,
                    2 => StrategyKind::Strangle,
                    _ => StrategyKind::Unknown,
                }
            } else if calls == 2 || puts == 2 {
                match (distinct_strikes.len(), distinct_expirations.len()) {
                    (2, 1) => StrategyKind::VerticalSpread,
                    (1, 2) => StrategyKind::CalendarSpread,
                    _ => StrategyKind::Unknown,
                }
            } else {
                StrategyKind::Unknown
            }
        }
        4 => {
            if calls == 2 && puts == 2 && distinct_strikes.len() == 4 {
                StrategyKind::IronCondor
            } else {
                StrategyKind::Unknown
            }
        }
        _ => StrategyKind::Unknown,
    }
}
