use thiserror::Error;

/// Fatal statement-level errors. No partial batch is produced when one of
/// these surfaces.
#[derive(Error, Debug)]
pub enum StatementError {
    /// A field that must stay broker-anonymous carries an
    /// account-number-shaped token. The message names the field, never its
    /// content.
    #[error("Privacy violation: {0}")]
    PrivacyViolation(String),

    #[error("Malformed statement: {0}")]
    Malformed(String),

    #[error("Unsupported base currency '{0}'")]
    UnsupportedBaseCurrency(String),
}
