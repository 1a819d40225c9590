//! Futures gateway - Main Entry Point

use anyhow::Result;
use auth::BinanceConfig;
use clap::{Arg, Command};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use futures_gateway::{GatewayConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "futures_gateway=info,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let matches = Command::new("futures-gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read-only REST gateway for a Binance USD-M futures account")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path, extension optional")
                .default_value("gateway"),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("routes") {
        futures_gateway::server::print_routes();
        return Ok(());
    }

    let default_config = "gateway".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let config = match GatewayConfig::load(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path, e);
            info!("Using default configuration");
            GatewayConfig::default()
        }
    }
    .with_port_override(std::env::var("PORT").ok());

    let credentials = match BinanceConfig::from_env() {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            warn!("{}; only public routes will succeed", e);
            None
        }
    };

    info!(
        "Starting futures gateway v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Server will bind to: {}", config.server_address());
    info!("Symbol: {}", config.exchange.symbol);
    info!(
        "Transactions: target {} trades, at most {} pages of {}, cap {}",
        config.transactions.target_count,
        config.transactions.max_pages,
        config.transactions.page_limit,
        config.transactions.output_cap
    );
    info!("Features enabled:");
    info!("  CORS: {}", config.cors.enabled);
    info!("  Compression: {}", config.server.compression);

    if let Err(e) = start_server(config, credentials).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
