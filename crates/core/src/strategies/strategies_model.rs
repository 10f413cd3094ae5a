//! Strategy group models.

use serde::{Deserialize, Serialize};

use crate::statements::RawTransaction;

/// Known multi-leg strategy shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    SingleLeg,
    Straddle,
    Strangle,
    VerticalSpread,
    CalendarSpread,
    IronCondor,
    Unknown,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::SingleLeg => "SINGLE_LEG",
            StrategyKind::Straddle => "STRADDLE",
            StrategyKind::Strangle => "STRANGLE",
            StrategyKind::VerticalSpread => "VERTICAL_SPREAD",
            StrategyKind::CalendarSpread => "CALENDAR_SPREAD",
            StrategyKind::IronCondor => "IRON_CONDOR",
            StrategyKind::Unknown => "UNKNOWN",
        }
    }
}

/// An order-linked set of transactions and its resolved strategy.
///
/// `strategy` is `None` until classification runs, is set exactly once, and
/// the group is immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyGroup {
    /// Broker order-group identifier; `None` for an ungrouped single leg.
    pub order_group_id: Option<String>,
    /// Legs in time order.
    pub legs: Vec<RawTransaction>,
    pub strategy: Option<StrategyKind>,
}

impl StrategyGroup {
    pub(crate) fn new(order_group_id: Option<String>, mut legs: Vec<RawTransaction>) -> Self {
        legs.sort_by_key(|leg| leg.timestamp);
        Self {
            order_group_id,
            legs,
            strategy: None,
        }
    }
}
