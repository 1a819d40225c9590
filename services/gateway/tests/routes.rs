//! Route tests against an in-memory exchange
//!
//! Each test builds the full router (middleware included) and drives it with
//! `tower::ServiceExt::oneshot`.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

use common::{FakeExchange, get_json, test_router};
use futures_gateway::exchange::{
    AccountAsset, FuturesAccount, OpenOrder, PositionRisk, TickerPrice,
};

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

#[tokio::test]
async fn test_current_price() {
    let exchange = FakeExchange {
        ticker: Some(TickerPrice {
            symbol: "BTCUSDT".to_string(),
            price: dec("67123.456"),
            time: Some(1_700_000_000_000),
        }),
        ..FakeExchange::new()
    };

    let (status, body) = get_json(test_router(Arc::new(exchange)), "/api/current-price").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"price": "67123.46"}));
}

#[tokio::test]
async fn test_balance() {
    let exchange = FakeExchange {
        account: Some(FuturesAccount {
            assets: vec![
                AccountAsset {
                    asset: "BNB".to_string(),
                    wallet_balance: dec("3"),
                    available_balance: dec("3"),
                },
                AccountAsset {
                    asset: "USDT".to_string(),
                    wallet_balance: dec("15000.1"),
                    available_balance: dec("100.005"),
                },
            ],
        }),
        ..FakeExchange::new()
    };

    let (status, body) = get_json(test_router(Arc::new(exchange)), "/api/balance").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"availableBalance": "100.01", "walletBalance": "15000.10"})
    );
}

#[tokio::test]
async fn test_balance_without_usdt_is_error() {
    let exchange = FakeExchange {
        account: Some(FuturesAccount { assets: vec![] }),
        ..FakeExchange::new()
    };

    let (status, body) = get_json(test_router(Arc::new(exchange)), "/api/balance").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"error": "Error fetching balance", "details": "USDT asset not found"})
    );
}

#[tokio::test]
async fn test_unrealized_pnl() {
    let exchange = FakeExchange {
        positions: vec![
            PositionRisk {
                symbol: "BTCUSDT".to_string(),
                position_amt: dec("0.015"),
                unrealized_profit: dec("40.125"),
                leverage: json!("20"),
            },
            PositionRisk {
                symbol: "ETHUSDT".to_string(),
                position_amt: dec("0"),
                unrealized_profit: dec("0"),
                leverage: json!("10"),
            },
        ],
        ..FakeExchange::new()
    };

    let (status, body) = get_json(test_router(Arc::new(exchange)), "/api/unrealized-pnl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "totalUnrealizedPNL": "40.13",
            "positions": [{
                "symbol": "BTCUSDT",
                "unrealizedProfit": "40.13",
                "positionAmt": 0.015,
                "leverage": "20"
            }]
        })
    );
}

#[tokio::test]
async fn test_unrealized_pnl_without_positions() {
    let (status, body) =
        get_json(test_router(Arc::new(FakeExchange::new())), "/api/unrealized-pnl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"totalUnrealizedPNL": "0.00", "positions": []}));
}

#[tokio::test]
async fn test_open_orders() {
    let exchange = FakeExchange {
        orders: vec![
            OpenOrder {
                order_id: 101,
                order_type: "STOP_MARKET".to_string(),
                side: "SELL".to_string(),
                price: Some(dec("0")),
                stop_price: Some(dec("58000")),
            },
            OpenOrder {
                order_id: 102,
                order_type: "TAKE_PROFIT_MARKET".to_string(),
                side: "BUY".to_string(),
                price: Some(dec("0")),
                stop_price: Some(dec("61000.555")),
            },
            OpenOrder {
                order_id: 103,
                order_type: "LIMIT".to_string(),
                side: "BUY".to_string(),
                price: Some(dec("59500.1")),
                stop_price: Some(dec("0")),
            },
        ],
        ..FakeExchange::new()
    };

    let (status, body) = get_json(test_router(Arc::new(exchange)), "/api/open-orders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "count": 3,
            "orders": [
                {"orderId": 101, "type": "Stop Loss", "side": "SELL", "price": "58000.00"},
                {"orderId": 102, "type": "Take Profit", "side": "BUY", "price": "61000.56"},
                {"orderId": 103, "type": "LIMIT", "side": "BUY", "price": "59500.10"}
            ]
        })
    );
}

#[tokio::test]
async fn test_transactions_newest_first() {
    let exchange = Arc::new(FakeExchange {
        trade_count: 3000,
        realized_every: 100,
        ..FakeExchange::new()
    });

    let (status, body) = get_json(test_router(Arc::clone(&exchange)), "/api/transactions").await;

    assert_eq!(status, StatusCode::OK);
    let trades = body.as_array().unwrap();
    // 30 realized trades across the whole history: it runs out before the target.
    assert_eq!(trades.len(), 30);

    let first = &trades[0];
    assert_eq!(first["symbol"], "BTCUSDT");
    assert_eq!(first["side"], "BUY");
    assert_eq!(first["price"], "65000.12");
    assert_eq!(first["qty"], "0.0025");
    assert_eq!(first["quoteQty"], "162.5003");
    assert_eq!(first["commission"], "0.06500000");
    assert_eq!(first["realizedPnl"], "123.46");
    assert!(first["time"].is_string());

    // Three full pages and the empty page that ends the history.
    let queries = exchange.trade_queries.lock().unwrap().clone();
    let cursors: Vec<Option<i64>> = queries.iter().map(|query| query.from_id).collect();
    assert_eq!(cursors, vec![None, Some(2001), Some(1001), Some(1)]);
    assert!(queries.iter().all(|query| query.limit == 1000));
}

#[tokio::test]
async fn test_transactions_stop_at_target() {
    // Every trade has realized PnL: the first page alone meets the target.
    let exchange = Arc::new(FakeExchange {
        trade_count: 50_000,
        realized_every: 1,
        ..FakeExchange::new()
    });

    let (status, body) = get_json(test_router(Arc::clone(&exchange)), "/api/transactions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 100);
    assert_eq!(exchange.trade_queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transactions_page_ceiling() {
    let exchange = Arc::new(FakeExchange {
        trade_count: 1_000_000,
        realized_every: 0,
        ..FakeExchange::new()
    });

    let (status, body) = get_json(test_router(Arc::clone(&exchange)), "/api/transactions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(exchange.trade_queries.lock().unwrap().len(), 10);
}

#[tokio::test]
async fn test_upstream_error_details_are_forwarded() {
    let upstream = json!({"code": -2015, "msg": "Invalid API-key, IP, or permissions for action."});
    let cases = [
        ("/api/current-price", "Error fetching current price"),
        ("/api/balance", "Error fetching balance"),
        ("/api/unrealized-pnl", "Error fetching unrealized PNL"),
        ("/api/open-orders", "Error fetching open orders"),
        ("/api/transactions", "Error fetching transactions"),
    ];

    for (uri, message) in cases {
        let exchange = FakeExchange::failing(401, upstream.clone());
        let (status, body) = get_json(test_router(Arc::new(exchange)), uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, json!({"error": message, "details": upstream}), "{uri}");
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json(test_router(Arc::new(FakeExchange::new())), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let response = test_router(Arc::new(FakeExchange::new()))
        .oneshot(Request::builder().uri("/api/orders").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    use axum::{
        body::Body,
        http::{Method, Request, header},
    };
    use tower::ServiceExt;

    let response = test_router(Arc::new(FakeExchange::new()))
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/balance")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allow_origin: Option<&str> = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|value| value.to_str().ok());
    assert_eq!(allow_origin, Some("*"));
}

