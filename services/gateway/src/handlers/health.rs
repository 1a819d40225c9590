//! Liveness endpoint

use axum::{extract::State, response::Json};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use tracing::debug;

use crate::models::HealthResponse;

/// Health check handlers
#[derive(Clone)]
pub struct HealthHandlers {
    start_time: Instant,
}

impl HealthHandlers {
    pub const fn new(start_time: Instant) -> Self {
        Self { start_time }
    }

    /// Always `ok` while the process serves requests
    pub async fn health_check(
        State(handlers): State<Self>,
    ) -> Json<HealthResponse> {
        debug!(
            uptime_seconds = handlers.start_time.elapsed().as_secs(),
            "Health check request"
        );

        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let Json(body) = HealthHandlers::health_check(State(HealthHandlers::new(Instant::now()))).await;

        assert_eq!(body.status, "ok");
        assert!(body.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }
}
