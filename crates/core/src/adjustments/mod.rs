//! Strike-adjustment detection and validation for special dividends.

mod adjustments_model;
mod adjustments_service;


pub use adjustments_model::{AdjustmentValidation, DetectedAdjustment};
pub use adjustments_service::AdjustmentValidator;
