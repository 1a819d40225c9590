//! Binance USD-M futures credentials and endpoints

use thiserror::Error;
use tracing::info;

/// Futures testnet REST host
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Futures mainnet REST host
pub const FUTURES_MAINNET_URL: &str = "https://fapi.binance.com";

/// Clock-skew tolerance sent with every signed request (milliseconds)
pub const DEFAULT_RECV_WINDOW_MS: u64 = 60_000;

const API_KEY_VAR: &str = "BINANCE_API_KEY";
const API_SECRET_VAR: &str = "BINANCE_API_SECRET";
const TESTNET_VAR: &str = "BINANCE_TESTNET";

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// A credential variable is unset or empty
    #[error("{0} is not set")]
    MissingCredential(&'static str),
}

/// Binance futures account configuration
#[derive(Clone)]
pub struct BinanceConfig {
    /// API key sent in the `X-MBX-APIKEY` header
    pub api_key: String,
    /// API secret used as the HMAC key
    pub api_secret: String,
    /// Use testnet instead of mainnet
    pub testnet: bool,
    /// Receive window in milliseconds
    pub recv_window: u64,
}

impl BinanceConfig {
    /// Create a testnet configuration with the default receive window
    #[must_use]
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            testnet: true,
            recv_window: DEFAULT_RECV_WINDOW_MS,
        }
    }

    /// Load credentials from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, AuthError> {
        dotenv::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(AuthError::MissingCredential(name))
        };

        let api_key = required(API_KEY_VAR)?;
        let api_secret = required(API_SECRET_VAR)?;
        let testnet = lookup(TESTNET_VAR)
            .and_then(|value| value.parse::<bool>().ok())
            .unwrap_or(true);

        let config = Self::new(api_key, api_secret).with_testnet(testnet);
        info!(
            "Loaded Binance futures credentials for {}",
            if config.testnet { "testnet" } else { "mainnet" }
        );
        Ok(config)
    }

    /// Set testnet flag
    #[must_use]
    pub const fn with_testnet(mut self, testnet: bool) -> Self {
        self.testnet = testnet;
        self
    }

    /// Set receive window
    #[must_use]
    pub const fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// REST base URL for the selected network
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        if self.testnet {
            FUTURES_TESTNET_URL
        } else {
            FUTURES_MAINNET_URL
        }
    }
}

impl std::fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("testnet", &self.testnet)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}
