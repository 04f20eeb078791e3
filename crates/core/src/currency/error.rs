//! Conversion error types.

use hopfx_shared::{AppError, Currency};
use rust_decimal::Decimal;
use thiserror::Error;

/// Conversion-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Amount is zero or negative.
    #[error("Amount must be greater than zero.")]
    InvalidAmount,

    /// No direct rate and no single intermediate currency connects the pair.
    #[error("Exchange path not found: {from} -> {to}")]
    PathNotFound {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },

    /// Rejected exchange rate.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    /// Commission multiplier is not positive.
    #[error("Commission rate must be positive, got {0}")]
    InvalidCommission(Decimal),

    /// Result does not fit in a decimal.
    #[error("Converted amount exceeds the supported range")]
    Overflow,
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        let message = err.to_string();
        match err {
            ConversionError::InvalidAmount
            | ConversionError::InvalidRate(_)
            | ConversionError::InvalidCommission(_) => Self::Validation(message),
            ConversionError::PathNotFound { .. } => Self::PathNotFound(message),
            ConversionError::Overflow => Self::BusinessRule(message),
        }
    }
}
