//! Signed account handlers: balance, open positions, open orders

use axum::{extract::State, response::Json};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResultExt, GatewayError},
    exchange::{FuturesAccount, FuturesApi, OpenOrder, PositionRisk},
    models::{BalanceResponse, OpenOrdersResponse, OrderView, PositionView, UnrealizedPnlResponse},
    utils::to_fixed,
};

/// Account handlers
#[derive(Clone)]
pub struct AccountHandlers {
    exchange: Arc<dyn FuturesApi>,
    symbol: String,
    quote_asset: String,
}

impl AccountHandlers {
    pub fn new(
        exchange: Arc<dyn FuturesApi>,
        symbol: impl Into<String>,
        quote_asset: impl Into<String>,
    ) -> Self {
        Self {
            exchange,
            symbol: symbol.into(),
            quote_asset: quote_asset.into(),
        }
    }

    /// Wallet and available balance of the quote asset
    pub async fn balance(
        State(handlers): State<Self>,
    ) -> Result<Json<BalanceResponse>, ApiError> {
        const CONTEXT: &str = "Error fetching balance";

        let account = handlers.exchange.account().await.or_api_error(CONTEXT)?;
        info!(assets = account.assets.len(), "Account response");

        balance_from_account(&account, &handlers.quote_asset)
            .map(Json)
            .or_api_error(CONTEXT)
    }

    /// Open positions and their summed unrealized PnL
    pub async fn unrealized_pnl(
        State(handlers): State<Self>,
    ) -> Result<Json<UnrealizedPnlResponse>, ApiError> {
        let positions = handlers
            .exchange
            .position_risk()
            .await
            .or_api_error("Error fetching unrealized PNL")?;
        info!(positions = positions.len(), "Positions response");

        Ok(Json(unrealized_pnl_from_positions(&positions)))
    }

    /// Open orders on the configured symbol
    pub async fn open_orders(
        State(handlers): State<Self>,
    ) -> Result<Json<OpenOrdersResponse>, ApiError> {
        let orders = handlers
            .exchange
            .open_orders(&handlers.symbol)
            .await
            .or_api_error("Error fetching open orders")?;
        info!(symbol = %handlers.symbol, orders = orders.len(), "Open orders response");

        Ok(Json(open_orders_view(&orders)))
    }
}

/// Balances of `asset`, or a data error when the account does not hold it
pub fn balance_from_account(
    account: &FuturesAccount,
    asset: &str,
) -> Result<BalanceResponse, GatewayError> {
    let balance = account
        .asset(asset)
        .ok_or_else(|| GatewayError::DataAssumption(format!("{asset} asset not found")))?;

    Ok(BalanceResponse {
        available_balance: to_fixed(balance.available_balance, 2),
        wallet_balance: to_fixed(balance.wallet_balance, 2),
    })
}

/// Positions with a non-zero amount and their total unrealized PnL
pub fn unrealized_pnl_from_positions(positions: &[PositionRisk]) -> UnrealizedPnlResponse {
    let open: Vec<&PositionRisk> = positions
        .iter()
        .filter(|position| !position.position_amt.is_zero())
        .collect();

    let total: Decimal = open.iter().map(|position| position.unrealized_profit).sum();

    UnrealizedPnlResponse {
        total_unrealized_pnl: to_fixed(total, 2),
        positions: open
            .into_iter()
            .map(|position| PositionView {
                symbol: position.symbol.clone(),
                unrealized_profit: to_fixed(position.unrealized_profit, 2),
                position_amt: position.position_amt.to_f64().unwrap_or_default(),
                leverage: position.leverage.clone(),
            })
            .collect(),
    }
}

/// Display label for an order type
///
/// Protective orders are labelled by purpose; the side does not change the
/// label. Every other type passes through.
pub fn describe_order_type(order_type: &str) -> String {
    match order_type {
        "STOP_MARKET" => "Stop Loss".to_string(),
        "TAKE_PROFIT_MARKET" => "Take Profit".to_string(),
        other => other.to_string(),
    }
}

/// Trigger price when set, else limit price, else "N/A"
fn display_price(order: &OpenOrder) -> String {
    order
        .stop_price
        .filter(|stop| !stop.is_zero())
        .or(order.price)
        .map_or_else(|| "N/A".to_string(), |price| to_fixed(price, 2))
}

pub fn open_orders_view(orders: &[OpenOrder]) -> OpenOrdersResponse {
    OpenOrdersResponse {
        count: orders.len(),
        orders: orders
            .iter()
            .map(|order| OrderView {
                order_id: order.order_id,
                order_type: describe_order_type(&order.order_type),
                side: order.side.clone(),
                price: display_price(order),
            })
            .collect(),
    }
}
