//! Cursor pagination over the user-trades endpoint

use async_trait::async_trait;
use futures::{Stream, stream};
use tracing::info;

use crate::{
    error::GatewayError,
    exchange::{FuturesApi, UserTrade, UserTradesQuery},
};

/// Position in the trade history
///
/// Unset on the first request (newest page); afterwards the smallest trade id
/// of the previous page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    pub from_id: Option<i64>,
}

impl PageCursor {
    #[must_use]
    pub const fn start() -> Self {
        Self { from_id: None }
    }

    /// Cursor for the page preceding `trades`, `None` for an empty page
    #[must_use]
    pub fn after(trades: &[UserTrade]) -> Option<Self> {
        trades.iter().map(|trade| trade.id).min().map(|id| Self {
            from_id: Some(id),
        })
    }
}

/// One fetched page and the cursor that produced it
#[derive(Debug, Clone)]
pub struct TradePage {
    /// 1-based
    pub number: usize,
    pub cursor: PageCursor,
    pub trades: Vec<UserTrade>,
}

/// Anything that can serve a page of trades for a cursor
#[async_trait]
pub trait TradePageSource: Send + Sync {
    async fn fetch_page(
        &self,
        cursor: PageCursor,
        limit: u32,
    ) -> Result<Vec<UserTrade>, GatewayError>;
}

/// Serves pages from the exchange's user-trades endpoint
pub struct ExchangeTradePages<'a> {
    api: &'a dyn FuturesApi,
}

impl<'a> ExchangeTradePages<'a> {
    #[must_use]
    pub fn new(api: &'a dyn FuturesApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TradePageSource for ExchangeTradePages<'_> {
    async fn fetch_page(
        &self,
        cursor: PageCursor,
        limit: u32,
    ) -> Result<Vec<UserTrade>, GatewayError> {
        self.api
            .user_trades(UserTradesQuery {
                limit,
                from_id: cursor.from_id,
            })
            .await
    }
}

/// Lazy stream of trade pages, newest first
///
/// Each page is requested only when polled, so dropping the stream stops
/// fetching. The stream ends at the first empty page and yields the error of a
/// failed fetch as its last item.
pub fn trade_pages<'a, S>(
    source: &'a S,
    limit: u32,
) -> impl Stream<Item = Result<TradePage, GatewayError>> + Send + 'a
where
    S: TradePageSource + ?Sized,
{
    stream::try_unfold(
        (PageCursor::start(), 1_usize),
        move |(cursor, number)| async move {
            info!(page = number, from_id = ?cursor.from_id, limit, "Fetching trade page");
            let trades = source.fetch_page(cursor, limit).await?;
            info!(page = number, received = trades.len(), "Received trade page");

            let Some(next) = PageCursor::after(&trades) else {
                return Ok(None);
            };
            let page = TradePage {
                number,
                cursor,
                trades,
            };
            Ok(Some((page, (next, number + 1))))
        },
    )
}
