//! Gateway error types and the JSON error envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;

/// Failures while serving a request
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credentials were not available at startup
    #[error("Exchange credentials not configured: {0}")]
    Configuration(String),

    /// The exchange answered with a non-success status
    #[error("Exchange returned HTTP {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the exchange
        status: u16,
        /// Response body, as JSON when it parses
        body: Value,
    },

    /// The request never produced a response
    #[error("Request to exchange failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response that does not match the documented shape
    #[error("Malformed exchange payload: {0}")]
    MalformedPayload(String),

    /// A well-formed response missing something the gateway relies on
    #[error("{0}")]
    DataAssumption(String),
}

impl GatewayError {
    /// Diagnostic forwarded to clients in the `details` field
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// A route failure: what the gateway was doing plus why it failed
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub source: GatewayError,
}

impl ApiError {
    #[must_use]
    pub const fn new(message: &'static str, source: GatewayError) -> Self {
        Self { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = self.source.details();
        error!("{}: {}", self.message, self.source);

        let body = ErrorBody {
            error: self.message.to_string(),
            details,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Attach a route message to a gateway result
pub trait ApiResultExt<T> {
    fn or_api_error(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> ApiResultExt<T> for Result<T, GatewayError> {
    fn or_api_error(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::new(message, source))
    }
}
