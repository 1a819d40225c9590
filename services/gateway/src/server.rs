//! Gateway server implementation

use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Instant};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::{
    config::GatewayConfig,
    exchange::FuturesApi,
    handlers::{AccountHandlers, HealthHandlers, MarketHandlers, TransactionHandlers},
    middleware::{create_cors_layer, logging_middleware},
};

/// Unified application state containing all handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub market_handlers: MarketHandlers,
    pub account_handlers: AccountHandlers,
    pub transaction_handlers: TransactionHandlers,
    pub health_handlers: HealthHandlers,
}

impl AppState {
    pub fn new(config: &GatewayConfig, exchange: Arc<dyn FuturesApi>, start_time: Instant) -> Self {
        Self {
            market_handlers: MarketHandlers::new(Arc::clone(&exchange), &config.exchange.symbol),
            account_handlers: AccountHandlers::new(
                Arc::clone(&exchange),
                &config.exchange.symbol,
                &config.exchange.quote_asset,
            ),
            transaction_handlers: TransactionHandlers::new(exchange, config.transactions.clone()),
            health_handlers: HealthHandlers::new(start_time),
        }
    }
}

/// Build the router with all routes and middleware
pub fn build_router(config: &GatewayConfig, exchange: Arc<dyn FuturesApi>) -> Router {
    let state = AppState::new(config, exchange, Instant::now());

    let mut app = Router::new()
        .route("/health", get(HealthHandlers::health_check))
        .route("/api/current-price", get(MarketHandlers::current_price))
        .route("/api/balance", get(AccountHandlers::balance))
        .route("/api/unrealized-pnl", get(AccountHandlers::unrealized_pnl))
        .route("/api/open-orders", get(AccountHandlers::open_orders))
        .route("/api/transactions", get(TransactionHandlers::transactions))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http());

    if config.server.compression {
        app = app.layer(CompressionLayer::new());
    }
    if config.cors.enabled {
        app = app.layer(create_cors_layer(&config.cors));
    }

    app
}

/// Futures gateway server
pub struct GatewayServer {
    config: GatewayConfig,
    exchange: Arc<dyn FuturesApi>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, exchange: Arc<dyn FuturesApi>) -> Self {
        Self { config, exchange }
    }

    /// Bind and serve until the process stops
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self.config.server_address().parse().map_err(|e| {
            error!(
                "Invalid server address '{}': {}",
                self.config.server_address(),
                e
            );
            anyhow::anyhow!("Invalid server address: {}", e)
        })?;

        let app = build_router(&self.config, self.exchange);
        info!("Gateway routes configured successfully");

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => {
                info!("Server running at http://{}", addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind TCP listener to {}: {}", addr, e);
                error!(
                    "Please check if the port is already in use or if you have sufficient permissions"
                );
                return Err(anyhow::anyhow!("Failed to bind to address {}: {}", addr, e));
            }
        };

        if let Err(e) = axum::serve(listener, app).await {
            error!("Server encountered a fatal error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        Ok(())
    }
}

/// API route documentation
pub fn print_routes() {
    println!("Futures Gateway Routes:");
    println!("=======================");
    println!();
    println!("Health:");
    println!("  GET  /health              - Liveness check");
    println!();
    println!("Market data (public):");
    println!("  GET  /api/current-price   - Last price of the configured symbol");
    println!();
    println!("Account (signed):");
    println!("  GET  /api/balance         - Quote asset balances");
    println!("  GET  /api/unrealized-pnl  - Open positions and unrealized PnL");
    println!("  GET  /api/open-orders     - Open orders on the configured symbol");
    println!("  GET  /api/transactions    - Recent trades with realized PnL");
    println!();
    println!("Errors are returned as HTTP 500 with {{\"error\", \"details\"}}.");
}
