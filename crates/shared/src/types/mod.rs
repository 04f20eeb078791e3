//! Common types used across the application.

pub mod currency;
pub mod money;

pub use currency::Currency;
pub use money::Money;
