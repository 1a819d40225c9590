//! Public market data handlers

use axum::{extract::State, response::Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResultExt},
    exchange::{FuturesApi, TickerPrice},
    models::CurrentPriceResponse,
    utils::to_fixed,
};

/// Market data handlers
#[derive(Clone)]
pub struct MarketHandlers {
    exchange: Arc<dyn FuturesApi>,
    symbol: String,
}

impl MarketHandlers {
    pub fn new(exchange: Arc<dyn FuturesApi>, symbol: impl Into<String>) -> Self {
        Self {
            exchange,
            symbol: symbol.into(),
        }
    }

    /// Last traded price of the configured symbol
    pub async fn current_price(
        State(handlers): State<Self>,
    ) -> Result<Json<CurrentPriceResponse>, ApiError> {
        let ticker = handlers
            .exchange
            .ticker_price(&handlers.symbol)
            .await
            .or_api_error("Error fetching current price")?;
        info!(symbol = %ticker.symbol, price = %ticker.price, "Price response");

        Ok(Json(price_from_ticker(&ticker)))
    }
}

/// Ticker price rounded to 2 decimals
pub fn price_from_ticker(ticker: &TickerPrice) -> CurrentPriceResponse {
    CurrentPriceResponse {
        price: to_fixed(ticker.price, 2),
    }
}
