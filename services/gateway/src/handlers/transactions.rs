//! Aggregated trade history

use axum::{extract::State, response::Json};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{ApiError, ApiResultExt},
    exchange::{FuturesApi, UserTrade},
    models::TransactionView,
    trades::{AggregationPolicy, ExchangeTradePages, aggregate_trades},
    utils::{to_fixed, to_local_string},
};

/// Transaction history handlers
#[derive(Clone)]
pub struct TransactionHandlers {
    exchange: Arc<dyn FuturesApi>,
    policy: AggregationPolicy,
}

impl TransactionHandlers {
    pub fn new(exchange: Arc<dyn FuturesApi>, policy: AggregationPolicy) -> Self {
        Self { exchange, policy }
    }

    /// Most recent trades with realized PnL, newest first
    pub async fn transactions(
        State(handlers): State<Self>,
    ) -> Result<Json<Vec<TransactionView>>, ApiError> {
        let source = ExchangeTradePages::new(handlers.exchange.as_ref());
        let outcome = aggregate_trades(&source, &handlers.policy)
            .await
            .or_api_error("Error fetching transactions")?;

        if let (Some(newest), Some(oldest)) = (outcome.trades.first(), outcome.trades.last()) {
            info!(
                count = outcome.trades.len(),
                "Returning trades from {} to {}",
                to_local_string(newest.time),
                to_local_string(oldest.time)
            );
        }

        Ok(Json(outcome.trades.iter().map(transaction_view).collect()))
    }
}

/// Client-facing shape of a trade
pub fn transaction_view(trade: &UserTrade) -> TransactionView {
    TransactionView {
        symbol: trade.symbol.clone(),
        side: trade.side.clone(),
        price: to_fixed(trade.price, 2),
        qty: to_fixed(trade.qty, 4),
        quote_qty: to_fixed(trade.quote_qty_or_derived(), 4),
        commission: to_fixed(trade.commission.unwrap_or(Decimal::ZERO), 8),
        time: to_local_string(trade.time),
        realized_pnl: to_fixed(trade.realized_pnl, 2),
    }
}
