//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for conversion and rate management
//! - Shared application state around the rate table
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use hopfx_core::currency::{ConversionError, Converter, RateTable};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// Conversions and listings take the read lock; adding a rate takes the
/// write lock, so a conversion never observes half of a rate pair.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide rate table.
    pub rates: Arc<RwLock<RateTable>>,
    /// Commission multiplier for two-step conversions.
    pub commission_rate: Decimal,
}

impl AppState {
    /// Creates the state, validating the commission multiplier.
    pub fn new(rates: RateTable, commission_rate: Decimal) -> Result<Self, ConversionError> {
        Ok(Self {
            commission_rate: Converter::validate_commission(commission_rate)?,
            rates: Arc::new(RwLock::new(rates)),
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
