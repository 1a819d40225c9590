//! Configuration for the futures gateway

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::trades::AggregationPolicy;

/// Gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Exchange connection settings
    pub exchange: ExchangeConfig,
    /// Trade history aggregation limits
    pub transactions: AggregationPolicy,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Enable compression
    pub compression: bool,
}

/// Exchange connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// REST base URL; derived from the credentials' network when unset
    pub base_url: Option<String>,
    /// Symbol served by the price and open-orders routes
    pub symbol: String,
    /// Asset reported by the balance route
    pub quote_asset: String,
    /// Receive window for signed requests (milliseconds)
    pub recv_window: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins, `*` for any
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight requests
    pub max_age_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_size: 64 * 1024, // 64KB
            compression: true,
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            symbol: "BTCUSDT".to_string(),
            quote_asset: "USDT".to_string(),
            recv_window: auth::DEFAULT_RECV_WINDOW_MS,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age_seconds: 86400, // 24 hours
        }
    }
}

impl GatewayConfig {
    /// Load configuration from an optional file plus `GATEWAY__*` environment overrides
    ///
    /// A missing file is not an error; defaults fill every absent field.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Apply a plain `PORT` value, as hosting platforms provide it
    #[must_use]
    pub fn with_port_override(mut self, port: Option<String>) -> Self {
        if let Some(raw) = port {
            match raw.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => warn!("Ignoring invalid PORT '{}': {}", raw, e),
            }
        }
        self
    }

    /// Get server address
    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
