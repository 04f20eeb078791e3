//! Currency conversion endpoint.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use hopfx_core::currency::Converter;
use hopfx_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the exchange routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange", get(exchange))
}

/// Query parameters for a conversion.
#[derive(Debug, Deserialize)]
pub struct ExchangeQuery {
    /// Currency to convert from.
    pub source_currency: Currency,
    /// Currency to convert to.
    pub target_currency: Currency,
    /// Amount in the source currency.
    pub amount: Decimal,
}

/// Response for a successful conversion.
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    /// Currency converted from.
    pub source_currency: Currency,
    /// Currency converted to.
    pub target_currency: Currency,
    /// Requested amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Amount in the target currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub converted_amount: Decimal,
    /// Resolution path: "identity", "direct" or "two_step".
    pub path: &'static str,
    /// Intermediate currency of a two-step conversion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<Currency>,
}

/// GET `/exchange` - Convert an amount between two currencies.
async fn exchange(
    State(state): State<AppState>,
    Query(query): Query<ExchangeQuery>,
) -> Result<Json<ExchangeResponse>, ApiError> {
    let rates = state.rates.read().await;
    let converter = Converter::with_commission(&rates, state.commission_rate)?;
    let conversion =
        converter.convert(&query.source_currency, &query.target_currency, query.amount)?;
    drop(rates);

    info!(
        from = %query.source_currency,
        to = %query.target_currency,
        amount = %query.amount,
        converted = %conversion.converted.amount,
        path = conversion.path.name(),
        "Converted amount"
    );

    Ok(Json(ExchangeResponse {
        via: conversion.path.via().cloned(),
        path: conversion.path.name(),
        source_currency: query.source_currency,
        target_currency: query.target_currency,
        amount: query.amount,
        converted_amount: conversion.converted.amount,
    }))
}
