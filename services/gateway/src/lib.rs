//! Binance USD-M futures gateway
//!
//! Read-only REST facade over a single futures account.
//! Features:
//! - Public price lookup for the configured symbol
//! - Signed balance, position, open-order and trade-history queries
//! - Paginated trade-history aggregation with bounded fan-out
//! - Uniform JSON error envelope

#![allow(missing_docs)]

use anyhow::Result;
use auth::{BinanceConfig, RequestSigner, binance::FUTURES_TESTNET_URL};
use std::sync::Arc;
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod exchange;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod trades;
pub mod utils;

pub use config::{CorsConfig, ExchangeConfig, GatewayConfig, ServerConfig};
pub use error::{ApiError, GatewayError};
pub use exchange::{BinanceFuturesClient, FuturesApi};
pub use server::{GatewayServer, build_router};
pub use trades::{AggregationPolicy, aggregate_trades};

/// Base URL: explicit override, else the credentials' network, else testnet
#[must_use]
pub fn resolve_base_url(config: &GatewayConfig, credentials: Option<&BinanceConfig>) -> String {
    config.exchange.base_url.clone().unwrap_or_else(|| {
        credentials.map_or(FUTURES_TESTNET_URL, BinanceConfig::base_url).to_string()
    })
}

/// Exchange client for `config`; without credentials only public routes succeed
#[must_use]
pub fn build_exchange_client(
    config: &GatewayConfig,
    credentials: Option<BinanceConfig>,
) -> BinanceFuturesClient {
    let base_url = resolve_base_url(config, credentials.as_ref());
    let signer = credentials.map(|credentials| {
        RequestSigner::new(credentials.with_recv_window(config.exchange.recv_window))
    });

    if signer.is_none() {
        warn!("Exchange credentials missing, signed routes will fail");
    }
    info!(base_url = %base_url, "Exchange client configured");

    BinanceFuturesClient::new(base_url, signer)
}

/// Start the futures gateway
pub async fn start_server(config: GatewayConfig, credentials: Option<BinanceConfig>) -> Result<()> {
    let exchange: Arc<dyn FuturesApi> = Arc::new(build_exchange_client(&config, credentials));
    GatewayServer::new(config, exchange).start().await
}
