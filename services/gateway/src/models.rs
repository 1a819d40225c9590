//! REST response models served to clients

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `/api/current-price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPriceResponse {
    /// Last price, 2 decimals
    pub price: String,
}

/// `/api/balance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub available_balance: String,
    pub wallet_balance: String,
}

/// `/api/unrealized-pnl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrealizedPnlResponse {
    #[serde(rename = "totalUnrealizedPNL")]
    pub total_unrealized_pnl: String,
    pub positions: Vec<PositionView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub symbol: String,
    /// 2 decimals
    pub unrealized_profit: String,
    /// Signed contract amount as a JSON number
    pub position_amt: f64,
    /// Passed through as the exchange reports it
    pub leverage: Value,
}

/// `/api/open-orders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrdersResponse {
    pub count: usize,
    pub orders: Vec<OrderView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: i64,
    /// "Stop Loss", "Take Profit", or the exchange order type
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    /// Trigger or limit price, 2 decimals, or "N/A"
    pub price: String,
}

/// One entry of `/api/transactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub symbol: String,
    pub side: String,
    pub price: String,        // 2 decimals
    pub qty: String,          // 4 decimals
    pub quote_qty: String,    // 4 decimals
    pub commission: String,   // 8 decimals
    pub time: String,         // server-local date and time
    pub realized_pnl: String, // 2 decimals
}

/// `/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// What the gateway was doing
    pub error: String,
    /// Upstream payload or failure message
    pub details: Value,
}
