//! Core error types for the statement pipeline.
//!
//! Three severities flow through the pipeline: fatal errors surface here as
//! `Error`, per-record failures are logged and dropped inside the converter,
//! and data-quality anomalies are returned as warning strings. Content of
//! privacy-skipped statement sections must never appear in any of them.

use thiserror::Error;

use crate::conversion::ConversionError;
use crate::statements::StatementError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the statement import pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Statement error: {0}")]
    Statement(#[from] StatementError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for statement data.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
