//! Exchange rates and currency conversion.

pub mod converter;
pub mod error;
pub mod rate;
pub mod rates;

#[cfg(test)]
mod props;

pub use converter::{Conversion, ConversionPath, Converter, DEFAULT_COMMISSION_RATE};
pub use error::ConversionError;
pub use rate::Rate;
pub use rates::RateTable;
