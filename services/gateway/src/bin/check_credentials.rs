//! Verify Binance futures credentials against the configured network

use auth::BinanceConfig;
use futures_gateway::{FuturesApi, GatewayConfig, GatewayError, build_exchange_client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("Checking Binance futures credentials");
    println!("{}", "=".repeat(50));

    let credentials = BinanceConfig::from_env()?;
    let key_prefix: String = credentials.api_key.chars().take(8).collect();
    println!("  API key:     {key_prefix}...");
    println!(
        "  Network:     {}",
        if credentials.testnet { "testnet" } else { "mainnet" }
    );

    let config = GatewayConfig::load("gateway")?;
    let client = build_exchange_client(&config, Some(credentials));
    println!("  Endpoint:    {}", client.base_url());
    println!();

    match client.account().await {
        Ok(account) => {
            println!("Credentials are valid.");
            for asset in account.assets.iter().filter(|asset| !asset.wallet_balance.is_zero()) {
                println!(
                    "  {:<8} wallet {}  available {}",
                    asset.asset, asset.wallet_balance, asset.available_balance
                );
            }
            Ok(())
        }
        Err(GatewayError::Upstream { status, body }) => {
            println!("Exchange rejected the request (HTTP {status}): {body}");
            println!("Possible reasons:");
            println!("  - API key/secret incorrect");
            println!("  - key created on the other network (BINANCE_TESTNET)");
            println!("  - IP not whitelisted");
            std::process::exit(1);
        }
        Err(e) => {
            println!("Request failed: {e}");
            std::process::exit(1);
        }
    }
}
