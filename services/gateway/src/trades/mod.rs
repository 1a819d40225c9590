//! Trade history aggregation
//!
//! The user-trades endpoint returns at most one page per call. [`pages`] turns
//! the endpoint into a lazy stream of strictly older pages and [`aggregator`]
//! folds that stream into the newest trades with realized PnL.

pub mod aggregator;
pub mod pages;

pub use aggregator::{
    AggregationOutcome, AggregationPolicy, StopReason, TradeAccumulator, aggregate_trades,
};
pub use pages::{ExchangeTradePages, PageCursor, TradePage, TradePageSource, trade_pages};
