//! Exchange rate listing and management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use hopfx_core::currency::Rate;
use hopfx_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the exchange rate routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/rates", get(list_rates).post(add_rate))
}

/// Request body for adding a rate pair.
#[derive(Debug, Deserialize)]
pub struct AddRateRequest {
    /// Source currency code.
    pub source_currency: Currency,
    /// Target currency code.
    pub target_currency: Currency,
    /// Exchange rate (source * rate = target).
    pub rate: f64,
}

/// One stored directed rate.
#[derive(Debug, Serialize)]
pub struct RateResponse {
    /// Source currency code.
    pub source_currency: Currency,
    /// Target currency code.
    pub target_currency: Currency,
    /// Exchange rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}

impl RateResponse {
    fn new(source: &Currency, target: &Currency, rate: Rate) -> Self {
        Self {
            source_currency: source.clone(),
            target_currency: target.clone(),
            rate: rate.value(),
        }
    }
}

/// GET `/rates` - List all stored rates ordered by pair.
async fn list_rates(State(state): State<AppState>) -> Json<Vec<RateResponse>> {
    let rates = state.rates.read().await;
    Json(
        rates
            .pairs()
            .map(|(source, target, rate)| RateResponse::new(source, target, rate))
            .collect(),
    )
}

/// POST `/rates` - Add or replace a rate pair; the reverse is stored too.
async fn add_rate(
    State(state): State<AppState>,
    Json(payload): Json<AddRateRequest>,
) -> Result<(StatusCode, Json<Vec<RateResponse>>), ApiError> {
    let rate = Rate::try_from(payload.rate)?;
    let source = payload.source_currency;
    let target = payload.target_currency;

    let mut rates = state.rates.write().await;
    rates.add_rate(source.clone(), target.clone(), rate)?;

    let stored: Vec<RateResponse> = [(&source, &target), (&target, &source)]
        .into_iter()
        .filter_map(|(from, to)| {
            rates
                .get_rate(from, to)
                .map(|rate| RateResponse::new(from, to, rate))
        })
        .collect();
    drop(rates);

    info!(from = %source, to = %target, rate = %rate, "Exchange rate added");

    Ok((StatusCode::CREATED, Json(stored)))
}

#[cfg(test)]
#[allow(clippy::float_arithmetic, clippy::float_cmp)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use hopfx_core::currency::{DEFAULT_COMMISSION_RATE, RateTable};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(RateTable::new(), DEFAULT_COMMISSION_RATE).unwrap()
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .merge(routes())
            .merge(crate::routes::exchange::routes())
            .with_state(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn post_rate(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/rates")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_seeded_rates() {
        let (status, json) = send(
            app(state()),
            Request::builder().uri("/rates").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let rates = json.as_array().unwrap();
        assert_eq!(rates.len(), 8);
        assert_eq!(rates[0]["source_currency"], "EUR");
        assert_eq!(rates[0]["target_currency"], "ILS");
        assert_eq!(rates[0]["rate"].as_f64().unwrap(), 3.5);
    }

    #[tokio::test]
    async fn test_add_rate_stores_both_directions() {
        let state = state();
        let (status, json) = send(
            app(state.clone()),
            post_rate(r#"{"source_currency":"JPY","target_currency":"USD","rate":0.0067}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        let stored = json.as_array().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1]["source_currency"], "USD");
        assert_eq!(stored[1]["target_currency"], "JPY");
        let reverse = stored[1]["rate"].as_f64().unwrap();
        assert!((reverse - 1.0 / 0.0067).abs() < 1e-6);

        assert_eq!(state.rates.read().await.len(), 10);

        // The new currency is now reachable from the exchange endpoint
        let (status, json) = send(
            app(state),
            Request::builder()
                .uri("/exchange?source_currency=JPY&target_currency=ILS&amount=1000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["path"], "two_step");
        assert_eq!(json["via"], "USD");
    }

    #[rstest]
    #[case(r#"{"source_currency":"JPY","target_currency":"USD","rate":0}"#)]
    #[case(r#"{"source_currency":"JPY","target_currency":"USD","rate":-2.5}"#)]
    #[case(r#"{"source_currency":"USD","target_currency":"USD","rate":1}"#)]
    #[tokio::test]
    async fn test_add_rate_rejects_invalid(#[case] body: &str) {
        let state = state();
        let (status, json) = send(app(state.clone()), post_rate(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "VALIDATION_ERROR");
        assert_eq!(state.rates.read().await.len(), 8);
    }
}
