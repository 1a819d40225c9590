//! Request logging and CORS

use axum::{
    extract::Request,
    http::{HeaderValue, Method, header::HeaderName},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::CorsConfig;

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client_ip = get_client_ip(&request);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = duration.as_millis(),
        client_ip = %client_ip,
        "Request processed"
    );

    response
}

/// CORS layer factory
pub fn create_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mut layer =
        CorsLayer::new().max_age(std::time::Duration::from_secs(cors.max_age_seconds));

    if cors.allowed_origins.iter().any(|origin| origin == "*") {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Skipping invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        layer = layer.allow_origin(origins);
    }

    let methods: Result<Vec<Method>, _> = cors
        .allowed_methods
        .iter()
        .map(|method| method.parse::<Method>())
        .collect();
    if let Ok(methods) = methods {
        layer = layer.allow_methods(methods);
    }

    let headers: Result<Vec<HeaderName>, _> = cors
        .allowed_headers
        .iter()
        .map(|header| header.parse::<HeaderName>())
        .collect();
    if let Ok(headers) = headers {
        layer = layer.allow_headers(headers);
    }

    layer
}

/// Extract client IP from request
fn get_client_ip(request: &Request) -> String {
    // Try X-Forwarded-For first (common in load balancers/proxies)
    let forwarded = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next());
    if let Some(first_ip) = forwarded {
        return first_ip.trim().to_string();
    }

    request
        .headers()
        .get("X-Real-IP")
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| "unknown".to_string(), str::to_string)
}
