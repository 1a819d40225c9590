//! reqwest-backed futures client

use async_trait::async_trait;
use auth::{QueryParams, RequestSigner};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use super::{
    ACCOUNT_ENDPOINT, FuturesAccount, FuturesApi, OPEN_ORDERS_ENDPOINT, OpenOrder,
    POSITION_RISK_ENDPOINT, PositionRisk, TICKER_PRICE_ENDPOINT, TickerPrice,
    USER_TRADES_ENDPOINT, UserTrade, UserTradesQuery,
};
use crate::error::GatewayError;

/// Futures REST client; private calls require a signer
#[derive(Debug, Clone)]
pub struct BinanceFuturesClient {
    http: Client,
    base_url: String,
    signer: Option<RequestSigner>,
}

impl BinanceFuturesClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, signer: Option<RequestSigner>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<T, GatewayError> {
        let url = if params.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, params.to_query_string())
        };
        debug!(%url, "Sending public request");

        let response = self.http.get(&url).send().await?;
        Self::decode(endpoint, response).await
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<T, GatewayError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            GatewayError::Configuration(
                "BINANCE_API_KEY or BINANCE_API_SECRET missing".to_string(),
            )
        })?;

        let request = signer.sign(method, endpoint, params);
        debug!(
            endpoint,
            query = %request.query_string(),
            "Sending signed request"
        );

        let (header, api_key) = request.api_key_header();
        let response = self
            .http
            .request(request.method.clone(), request.url(&self.base_url))
            .header(header, api_key)
            .send()
            .await?;
        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &str,
        response: Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            error!(endpoint, status = status.as_u16(), %body, "Exchange request failed");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| GatewayError::MalformedPayload(format!("{endpoint}: {e}")))
    }
}

#[async_trait]
impl FuturesApi for BinanceFuturesClient {
    async fn ticker_price(&self, symbol: &str) -> Result<TickerPrice, GatewayError> {
        self.public_get(TICKER_PRICE_ENDPOINT, QueryParams::new().with("symbol", symbol))
            .await
    }

    async fn account(&self) -> Result<FuturesAccount, GatewayError> {
        self.signed(Method::GET, ACCOUNT_ENDPOINT, QueryParams::new())
            .await
    }

    async fn position_risk(&self) -> Result<Vec<PositionRisk>, GatewayError> {
        self.signed(Method::GET, POSITION_RISK_ENDPOINT, QueryParams::new())
            .await
    }

    async fn open_orders(&self, symbol: &str) -> Result<Vec<OpenOrder>, GatewayError> {
        self.signed(
            Method::GET,
            OPEN_ORDERS_ENDPOINT,
            QueryParams::new().with("symbol", symbol),
        )
        .await
    }

    async fn user_trades(&self, query: UserTradesQuery) -> Result<Vec<UserTrade>, GatewayError> {
        self.signed(Method::GET, USER_TRADES_ENDPOINT, query.to_params())
            .await
    }
}
