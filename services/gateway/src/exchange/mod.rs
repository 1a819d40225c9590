//! Binance USD-M futures REST collaborator

use async_trait::async_trait;
use auth::QueryParams;

use crate::error::GatewayError;

pub mod client;
pub mod types;

pub use client::BinanceFuturesClient;
pub use types::{AccountAsset, FuturesAccount, OpenOrder, PositionRisk, TickerPrice, UserTrade};

pub const TICKER_PRICE_ENDPOINT: &str = "/fapi/v1/ticker/price";
pub const ACCOUNT_ENDPOINT: &str = "/fapi/v2/account";
pub const POSITION_RISK_ENDPOINT: &str = "/fapi/v2/positionRisk";
pub const OPEN_ORDERS_ENDPOINT: &str = "/fapi/v1/openOrders";
pub const USER_TRADES_ENDPOINT: &str = "/fapi/v1/userTrades";

/// Largest page the user-trades endpoint serves
pub const MAX_TRADES_PER_PAGE: u32 = 1000;

/// One page request against the user-trades endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserTradesQuery {
    pub limit: u32,
    pub from_id: Option<i64>,
}

impl UserTradesQuery {
    /// `limit` first, then `fromId` when a cursor is set
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new().with("limit", self.limit);
        if let Some(from_id) = self.from_id {
            params.push("fromId", from_id);
        }
        params
    }
}

/// Calls the gateway makes against the exchange
#[async_trait]
pub trait FuturesApi: Send + Sync {
    /// Public ticker, unsigned
    async fn ticker_price(&self, symbol: &str) -> Result<TickerPrice, GatewayError>;

    async fn account(&self) -> Result<FuturesAccount, GatewayError>;

    async fn position_risk(&self) -> Result<Vec<PositionRisk>, GatewayError>;

    async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, GatewayError>;

    async fn user_trades(&self, query: UserTradesQuery) -> Result<Vec<UserTrade>, GatewayError>;
}
