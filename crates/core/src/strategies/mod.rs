//! Multi-leg option strategy detection.

mod strategies_model;
mod strategies_service;


pub use strategies_model::{StrategyGroup, StrategyKind};
pub use strategies_service::StrategyDetector;
