//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (bad amount, bad rate, bad commission).
    #[error("{0}")]
    Validation(String),

    /// No conversion path between two currencies.
    #[error("{0}")]
    PathNotFound(String),

    /// Business rule violation.
    #[error("{0}")]
    BusinessRule(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::PathNotFound(_) => 400,
            Self::BusinessRule(_) => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PathNotFound(_) => "PATH_NOT_FOUND",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
        }
    }
}
