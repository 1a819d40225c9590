//! Fold trade pages into the newest trades with realized PnL

use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use tracing::info;

use super::pages::{PageCursor, TradePage, TradePageSource, trade_pages};
use crate::{error::GatewayError, exchange::MAX_TRADES_PER_PAGE, exchange::UserTrade};

/// Limits of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    /// Trades requested per page
    pub page_limit: u32,
    /// Stop once this many trades with realized PnL are collected
    pub target_count: usize,
    /// Hard ceiling on pages fetched per run
    pub max_pages: usize,
    /// Maximum trades returned
    pub output_cap: usize,
}

impl Default for AggregationPolicy {
    fn default() -> Self {
        Self {
            page_limit: MAX_TRADES_PER_PAGE,
            target_count: 50,
            max_pages: 10,
            output_cap: 100,
        }
    }
}

/// Why a run stopped fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough trades with realized PnL were collected
    TargetReached,
    /// The exchange returned an empty page
    Exhausted,
    /// `max_pages` pages were fetched
    PageCeiling,
}

/// Running state of one aggregation
#[derive(Debug, Default)]
pub struct TradeAccumulator {
    all_trades: Vec<UserTrade>,
    realized: Vec<UserTrade>,
    cursors: Vec<PageCursor>,
}

impl TradeAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.cursors.len()
    }

    #[must_use]
    pub fn total_fetched(&self) -> usize {
        self.all_trades.len()
    }

    #[must_use]
    pub fn realized_count(&self) -> usize {
        self.realized.len()
    }

    /// Whether another page may be fetched under `policy`
    #[must_use]
    pub fn check(&self, policy: &AggregationPolicy) -> ControlFlow<StopReason> {
        if self.realized.len() >= policy.target_count {
            ControlFlow::Break(StopReason::TargetReached)
        } else if self.pages_fetched() >= policy.max_pages {
            ControlFlow::Break(StopReason::PageCeiling)
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Add a page and decide whether to continue
    pub fn absorb(&mut self, page: TradePage, policy: &AggregationPolicy) -> ControlFlow<StopReason> {
        let before = self.realized.len();
        self.realized
            .extend(page.trades.iter().filter(|trade| trade.has_realized_pnl()).cloned());
        self.all_trades.extend(page.trades);
        self.cursors.push(page.cursor);

        info!(
            page = page.number,
            found = self.realized.len() - before,
            total = self.realized.len(),
            "Collected trades with realized PnL"
        );

        self.check(policy)
    }

    /// Newest first, capped at `policy.output_cap`
    #[must_use]
    pub fn finish(self, policy: &AggregationPolicy, stop_reason: StopReason) -> AggregationOutcome {
        let mut trades = self.realized;
        // Stable, so equal timestamps keep fetch order.
        trades.sort_by(|a, b| b.time.cmp(&a.time));
        trades.truncate(policy.output_cap);

        AggregationOutcome {
            trades,
            stop_reason,
            pages_fetched: self.cursors.len(),
            total_fetched: self.all_trades.len(),
            cursors: self.cursors,
        }
    }
}

/// Result of one aggregation run
#[derive(Debug, Clone)]
pub struct AggregationOutcome {
    /// Trades with realized PnL, newest first
    pub trades: Vec<UserTrade>,
    pub stop_reason: StopReason,
    pub pages_fetched: usize,
    /// Every trade fetched, with or without realized PnL
    pub total_fetched: usize,
    /// Cursor used for each fetched page, in fetch order
    pub cursors: Vec<PageCursor>,
}

/// Page through `source` until `policy` is satisfied or history runs out
///
/// Pages are fetched one after another; a failed fetch aborts the run.
pub async fn aggregate_trades<S>(
    source: &S,
    policy: &AggregationPolicy,
) -> Result<AggregationOutcome, GatewayError>
where
    S: TradePageSource + ?Sized,
{
    let mut accumulator = TradeAccumulator::new();

    let stop_reason = match accumulator.check(policy) {
        ControlFlow::Break(reason) => reason,
        ControlFlow::Continue(()) => {
            let pages = trade_pages(source, policy.page_limit);
            futures::pin_mut!(pages);
            loop {
                let Some(page) = pages.try_next().await? else {
                    break StopReason::Exhausted;
                };
                if let ControlFlow::Break(reason) = accumulator.absorb(page, policy) {
                    break reason;
                }
            }
        }
    };

    info!(
        pages = accumulator.pages_fetched(),
        fetched = accumulator.total_fetched(),
        realized = accumulator.realized_count(),
        ?stop_reason,
        "Trade aggregation finished"
    );

    Ok(accumulator.finish(policy, stop_reason))
}
