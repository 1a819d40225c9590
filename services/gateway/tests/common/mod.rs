//! Test helpers and utilities

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use futures_gateway::{
    FuturesApi, GatewayConfig, GatewayError, build_router,
    exchange::{FuturesAccount, OpenOrder, PositionRisk, TickerPrice, UserTrade, UserTradesQuery},
};

/// In-memory exchange with canned responses
///
/// Trade history holds ids `1..=trade_count`; a page with a cursor serves the
/// ids strictly below it, newest page first.
#[derive(Default)]
pub struct FakeExchange {
    pub ticker: Option<TickerPrice>,
    pub account: Option<FuturesAccount>,
    pub positions: Vec<PositionRisk>,
    pub orders: Vec<OpenOrder>,
    pub trade_count: i64,
    pub realized_every: i64,
    /// Every call fails with this upstream status and body
    pub failure: Option<(u16, Value)>,
    pub trade_queries: Mutex<Vec<UserTradesQuery>>,
}

impl FakeExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16, body: Value) -> Self {
        Self {
            failure: Some((status, body)),
            ..Self::default()
        }
    }

    fn check_failure(&self) -> Result<(), GatewayError> {
        match &self.failure {
            Some((status, body)) => Err(GatewayError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn trade(&self, id: i64) -> UserTrade {
        let realized = self.realized_every > 0 && id % self.realized_every == 0;
        UserTrade {
            id,
            symbol: "BTCUSDT".to_string(),
            side: if id % 2 == 0 { "BUY" } else { "SELL" }.to_string(),
            price: Decimal::new(6_500_012_345, 5),
            qty: Decimal::new(25, 4),
            quote_qty: None,
            commission: Some(Decimal::new(65, 3)),
            time: 1_700_000_000_000 + id * 1000,
            realized_pnl: if realized { Decimal::new(1_234_567, 4) } else { Decimal::ZERO },
        }
    }
}

#[async_trait]
impl FuturesApi for FakeExchange {
    async fn ticker_price(&self, _symbol: &str) -> Result<TickerPrice, GatewayError> {
        self.check_failure()?;
        self.ticker
            .clone()
            .ok_or_else(|| GatewayError::MalformedPayload("no ticker".to_string()))
    }

    async fn account(&self) -> Result<FuturesAccount, GatewayError> {
        self.check_failure()?;
        self.account
            .clone()
            .ok_or_else(|| GatewayError::MalformedPayload("no account".to_string()))
    }

    async fn position_risk(&self) -> Result<Vec<PositionRisk>, GatewayError> {
        self.check_failure()?;
        Ok(self.positions.clone())
    }

    async fn open_orders(&self, _symbol: &str) -> Result<Vec<OpenOrder>, GatewayError> {
        self.check_failure()?;
        Ok(self.orders.clone())
    }

    async fn user_trades(&self, query: UserTradesQuery) -> Result<Vec<UserTrade>, GatewayError> {
        self.trade_queries.lock().unwrap().push(query);
        self.check_failure()?;

        let upper = query.from_id.map_or(self.trade_count, |id| id - 1);
        let lower = (upper - i64::from(query.limit) + 1).max(1);
        Ok((lower..=upper).map(|id| self.trade(id)).collect())
    }
}

/// Test configuration factory
pub fn create_test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.compression = false;
    config
}

pub fn test_router(exchange: Arc<FakeExchange>) -> Router {
    build_router(&create_test_config(), exchange)
}

/// Issue a GET against the router and decode the JSON body
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}
