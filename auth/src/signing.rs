//! HMAC-SHA256 request signing for private futures endpoints
//!
//! The exchange verifies the signature over the exact query bytes it receives,
//! so the string that is signed and the string that is sent are produced by the
//! same [`QueryParams::to_query_string`] call.

use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;
use tracing::warn;

use crate::binance::BinanceConfig;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the public API key
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

const TIMESTAMP_KEY: &str = "timestamp";
const RECV_WINDOW_KEY: &str = "recvWindow";

/// Query parameters in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a parameter, builder style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.pairs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `key=value` pairs joined by `&`, in insertion order, values as given
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn retain_caller_keys(&mut self) {
        self.pairs.retain(|(key, _)| {
            let reserved = key == TIMESTAMP_KEY || key == RECV_WINDOW_KEY;
            if reserved {
                warn!("Dropping caller-supplied '{}' parameter; the signer sets it", key);
            }
            !reserved
        });
    }
}

/// A private request ready to send
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    pub endpoint: String,
    /// Caller parameters followed by `timestamp` and `recvWindow`
    pub params: QueryParams,
    pub timestamp: i64,
    pub recv_window: u64,
    /// Lowercase hex HMAC-SHA256 of [`Self::query_string`]
    pub signature: String,
    api_key: String,
}

impl SignedRequest {
    /// The signed query string, without the signature
    #[must_use]
    pub fn query_string(&self) -> String {
        self.params.to_query_string()
    }

    /// Fully qualified URL including the signature
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}&signature={}",
            base_url.trim_end_matches('/'),
            self.endpoint,
            self.query_string(),
            self.signature
        )
    }

    /// Header name and value identifying the API key
    #[must_use]
    pub fn api_key_header(&self) -> (&'static str, &str) {
        (API_KEY_HEADER, &self.api_key)
    }
}

/// Signs private requests with the configured secret
#[derive(Debug, Clone)]
pub struct RequestSigner {
    config: BinanceConfig,
}

impl RequestSigner {
    #[must_use]
    pub const fn new(config: BinanceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    #[must_use]
    pub const fn config(&self) -> &BinanceConfig {
        &self.config
    }

    /// Hex-encoded HMAC-SHA256 of `query` keyed by the API secret
    #[must_use]
    pub fn sign_query(&self, query: &str) -> String {
        let mut mac = match HmacSha256::new_from_slice(self.config.api_secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC accepts keys of any length"),
        };
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Sign a request stamped with the current time
    #[must_use]
    pub fn sign(&self, method: Method, endpoint: &str, params: QueryParams) -> SignedRequest {
        self.sign_at(method, endpoint, params, chrono::Utc::now().timestamp_millis())
    }

    /// Sign a request stamped with `timestamp` (epoch milliseconds)
    #[must_use]
    pub fn sign_at(
        &self,
        method: Method,
        endpoint: &str,
        mut params: QueryParams,
        timestamp: i64,
    ) -> SignedRequest {
        params.retain_caller_keys();
        params
            .push(TIMESTAMP_KEY, timestamp)
            .push(RECV_WINDOW_KEY, self.config.recv_window);

        let signature = self.sign_query(&params.to_query_string());

        SignedRequest {
            method,
            endpoint: endpoint.to_string(),
            params,
            timestamp,
            recv_window: self.config.recv_window,
            signature,
            api_key: self.config.api_key.clone(),
        }
    }
}
