//! Client for the exchange endpoint.

use std::time::Duration;

use anyhow::Context;
use rust_decimal::Decimal;
use hopfx_shared::Currency;
use serde::Deserialize;

/// Converts one amount between two currencies.
#[allow(async_fn_in_trait)]
pub trait ConversionClient {
    /// Returns the converted amount, or an error for any failure on this row.
    async fn convert(
        &self,
        source: &Currency,
        target: &Currency,
        amount: Decimal,
    ) -> anyhow::Result<Decimal>;
}

/// Successful body of `GET /exchange`; other fields are ignored.
#[derive(Debug, Deserialize)]
struct ExchangeReply {
    #[serde(with = "rust_decimal::serde::float")]
    converted_amount: Decimal,
}

/// Calls the HTTP exchange endpoint once per transaction.
#[derive(Debug, Clone)]
pub struct HttpConversionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpConversionClient {
    /// Creates a client for `endpoint` with a per-request timeout.
    pub fn new(endpoint: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }
}

impl ConversionClient for HttpConversionClient {
    async fn convert(
        &self,
        source: &Currency,
        target: &Currency,
        amount: Decimal,
    ) -> anyhow::Result<Decimal> {
        let amount = amount.to_string();
        let reply: ExchangeReply = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("source_currency", source.code()),
                ("target_currency", target.code()),
                ("amount", amount.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(reply.converted_amount)
    }
}
