//! Currency conversion policy.
//!
//! Rules, first match wins:
//! 1. Non-positive amount is rejected.
//! 2. Same source and target returns the amount unchanged.
//! 3. A direct rate converts without commission.
//! 4. A single intermediate currency converts in two legs; the commission
//!    multiplier is applied once, to the final amount.
//! 5. Anything else has no path.

use hopfx_shared::{Currency, Money};
use rust_decimal::Decimal;
use tracing::debug;

use super::error::ConversionError;
use super::rate::Rate;
use super::rates::RateTable;

/// Default two-step commission multiplier (1%).
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(101, 0, 0, false, 2);

/// How a conversion was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionPath {
    /// Source and target are the same currency.
    Identity,
    /// A stored rate connects source and target.
    Direct {
        /// Rate used.
        rate: Rate,
    },
    /// Converted through one intermediate currency, with commission.
    TwoStep {
        /// Intermediate currency.
        via: Currency,
        /// Source → intermediate rate.
        to_intermediate: Rate,
        /// Intermediate → target rate.
        to_target: Rate,
    },
}

impl ConversionPath {
    /// Short name used in API responses and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Direct { .. } => "direct",
            Self::TwoStep { .. } => "two_step",
        }
    }

    /// Intermediate currency for two-step conversions.
    #[must_use]
    pub const fn via(&self) -> Option<&Currency> {
        match self {
            Self::TwoStep { via, .. } => Some(via),
            Self::Identity | Self::Direct { .. } => None,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Amount before conversion.
    pub original: Money,
    /// Amount in the target currency.
    pub converted: Money,
    /// Resolution path.
    pub path: ConversionPath,
}

/// Converts amounts over a borrowed rate table.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'a> {
    rates: &'a RateTable,
    commission_rate: Decimal,
}

impl<'a> Converter<'a> {
    /// Creates a converter with the default 1% two-step commission.
    #[must_use]
    pub const fn new(rates: &'a RateTable) -> Self {
        Self {
            rates,
            commission_rate: DEFAULT_COMMISSION_RATE,
        }
    }

    /// Creates a converter with a custom commission multiplier.
    pub fn with_commission(
        rates: &'a RateTable,
        commission_rate: Decimal,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            rates,
            commission_rate: Self::validate_commission(commission_rate)?,
        })
    }

    /// Checks that `commission_rate` is a positive multiplier and returns it.
    pub fn validate_commission(commission_rate: Decimal) -> Result<Decimal, ConversionError> {
        if commission_rate <= Decimal::ZERO {
            return Err(ConversionError::InvalidCommission(commission_rate));
        }
        Ok(commission_rate)
    }

    /// Commission multiplier applied to two-step conversions.
    #[must_use]
    pub const fn commission_rate(&self) -> Decimal {
        self.commission_rate
    }

    /// Converts `amount` from `source` to `target`.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is zero or negative
    /// - `PathNotFound` if neither a direct rate nor an intermediate exists
    /// - `Overflow` if the result is outside the decimal range
    pub fn convert(
        &self,
        source: &Currency,
        target: &Currency,
        amount: Decimal,
    ) -> Result<Conversion, ConversionError> {
        let original = Money::new(amount, source.clone());
        if !original.is_positive() {
            return Err(ConversionError::InvalidAmount);
        }

        if source == target {
            return Ok(Conversion {
                converted: original.clone(),
                original,
                path: ConversionPath::Identity,
            });
        }

        if let Some(rate) = self.rates.get_rate(source, target) {
            let converted = multiply(amount, rate.value())?;
            debug!(from = %source, to = %target, %rate, "Direct conversion");
            return Ok(Conversion {
                original,
                converted: Money::new(converted, target.clone()),
                path: ConversionPath::Direct { rate },
            });
        }

        let Some(via) = self.rates.find_intermediate(source, target) else {
            debug!(from = %source, to = %target, "No conversion path");
            return Err(ConversionError::PathNotFound {
                from: source.clone(),
                to: target.clone(),
            });
        };

        let (Some(to_intermediate), Some(to_target)) = (
            self.rates.get_rate(source, via),
            self.rates.get_rate(via, target),
        ) else {
            return Err(ConversionError::PathNotFound {
                from: source.clone(),
                to: target.clone(),
            });
        };

        let intermediate_amount = multiply(amount, to_intermediate.value())?;
        let final_amount = multiply(intermediate_amount, to_target.value())?;
        let converted = multiply(final_amount, self.commission_rate)?;

        debug!(
            from = %source,
            to = %target,
            via = %via,
            commission_rate = %self.commission_rate,
            "Two-step conversion"
        );

        Ok(Conversion {
            original,
            converted: Money::new(converted, target.clone()),
            path: ConversionPath::TwoStep {
                via: via.clone(),
                to_intermediate,
                to_target,
            },
        })
    }
}

fn multiply(lhs: Decimal, rhs: Decimal) -> Result<Decimal, ConversionError> {
    lhs.checked_mul(rhs).ok_or(ConversionError::Overflow)
}
