//! Wire types returned by the futures API
//!
//! Numeric fields arrive as decimal strings and are kept as [`Decimal`] so that
//! display rounding operates on the exchange's exact value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /fapi/v1/ticker/price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: Decimal,
    #[serde(default)]
    pub time: Option<i64>,
}

/// `GET /fapi/v2/account`, only the parts the gateway reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesAccount {
    pub assets: Vec<AccountAsset>,
}

impl FuturesAccount {
    #[must_use]
    pub fn asset(&self, name: &str) -> Option<&AccountAsset> {
        self.assets.iter().find(|asset| asset.asset == name)
    }
}

/// Per-asset balances of the futures account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAsset {
    pub asset: String,
    #[serde(rename = "walletBalance")]
    pub wallet_balance: Decimal,
    #[serde(rename = "availableBalance")]
    pub available_balance: Decimal,
}

/// `GET /fapi/v2/positionRisk`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRisk {
    pub symbol: String,
    #[serde(rename = "positionAmt")]
    pub position_amt: Decimal,
    #[serde(rename = "unRealizedProfit")]
    pub unrealized_profit: Decimal,
    #[serde(default)]
    pub leverage: Value,
}

/// `GET /fapi/v1/openOrders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    #[serde(rename = "orderId")]
    pub order_id: i64,
    #[serde(rename = "type")]
    pub order_type: String,
    pub side: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(rename = "stopPrice", default)]
    pub stop_price: Option<Decimal>,
}

/// `GET /fapi/v1/userTrades`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTrade {
    /// Exchange-assigned, increasing per account
    pub id: i64,
    pub symbol: String,
    pub side: String,
    pub price: Decimal,
    pub qty: Decimal,
    #[serde(rename = "quoteQty", default)]
    pub quote_qty: Option<Decimal>,
    #[serde(default)]
    pub commission: Option<Decimal>,
    /// Epoch milliseconds
    pub time: i64,
    #[serde(rename = "realizedPnl")]
    pub realized_pnl: Decimal,
}

impl UserTrade {
    /// Closed part of a position, i.e. non-zero realized PnL
    #[must_use]
    pub fn has_realized_pnl(&self) -> bool {
        !self.realized_pnl.is_zero()
    }

    /// Reported quote quantity, or `price × qty` when the exchange omits it
    #[must_use]
    pub fn quote_qty_or_derived(&self) -> Decimal {
        self.quote_qty.unwrap_or(self.price * self.qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_user_trade_from_exchange_json() {
        let trade: UserTrade = serde_json::from_value(json!({
            "buyer": false,
            "commission": "-0.07819010",
            "commissionAsset": "USDT",
            "id": 698759,
            "maker": false,
            "orderId": 25851813,
            "price": "7819.01",
            "qty": "0.002",
            "quoteQty": "15.63802",
            "realizedPnl": "-0.91539999",
            "side": "SELL",
            "positionSide": "SHORT",
            "symbol": "BTCUSDT",
            "time": 1569514978020_i64
        }))
        .unwrap();

        assert_eq!(trade.id, 698_759);
        assert_eq!(trade.price, dec!(7819.01));
        assert_eq!(trade.quote_qty, Some(dec!(15.63802)));
        assert!(trade.has_realized_pnl());
    }

    #[test]
    fn test_missing_optional_trade_fields() {
        let trade: UserTrade = serde_json::from_value(json!({
            "id": 1,
            "symbol": "BTCUSDT",
            "side": "BUY",
            "price": "100.5",
            "qty": "2",
            "time": 1,
            "realizedPnl": "0.00000000"
        }))
        .unwrap();

        assert_eq!(trade.quote_qty, None);
        assert_eq!(trade.commission, None);
        assert_eq!(trade.quote_qty_or_derived(), dec!(201.0));
        assert!(!trade.has_realized_pnl());
    }

    #[test]
    fn test_account_asset_lookup() {
        let account: FuturesAccount = serde_json::from_value(json!({
            "assets": [
                {"asset": "BTC", "walletBalance": "0.1", "availableBalance": "0.1"},
                {"asset": "USDT", "walletBalance": "150", "availableBalance": "100.005"}
            ]
        }))
        .unwrap();

        let usdt = account.asset("USDT").unwrap();
        assert_eq!(usdt.available_balance, dec!(100.005));
        assert!(account.asset("BNB").is_none());
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let result = serde_json::from_value::<TickerPrice>(json!({
            "symbol": "BTCUSDT",
            "price": "not-a-number"
        }));
        assert!(result.is_err());
    }
}
