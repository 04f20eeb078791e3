//! Core business logic for Hopfx.
//!
//! This crate contains pure conversion logic with ZERO web dependencies.
//! The rate table and the conversion policy live here.
//!
//! # Modules
//!
//! - `currency` - Exchange rate table and currency conversion

pub mod currency;
