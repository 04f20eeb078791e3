//! Validated exchange rate.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ConversionError;

/// Exchange rate (1 source unit = rate target units). Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, ConversionError> {
        if value <= Decimal::ZERO {
            return Err(ConversionError::InvalidRate(format!(
                "rate must be positive, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Wraps a value known to be positive.
    pub(crate) const fn from_positive(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns the reverse-direction rate (1 / rate).
    ///
    /// Fails when the reciprocal is not representable or rounds to zero.
    pub fn inverse(self) -> Result<Self, ConversionError> {
        Decimal::ONE
            .checked_div(self.0)
            .filter(|inverse| !inverse.is_zero())
            .map(Self)
            .ok_or_else(|| {
                ConversionError::InvalidRate(format!("reciprocal of {} is out of range", self.0))
            })
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = ConversionError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for Rate {
    type Error = ConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ConversionError::InvalidRate(format!(
                "rate must be a finite number, got {value}"
            )));
        }
        let decimal = Decimal::try_from(value).map_err(|_| {
            ConversionError::InvalidRate(format!("rate {value} is out of the supported range"))
        })?;
        Self::new(decimal)
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
