//! Integration tests for the REST client against a mock server

use chrono::{TimeZone, Utc};
use lightning_ohlc::api::{ApiError, ExecutionQuery, HealthStatus, RestClient, RestConfig};
use lightning_ohlc::ohlc::build_candles;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, retry_limit: u32) -> RestClient {
    RestClient::with_config(RestConfig {
        base_url: server.uri(),
        retry_limit,
        retry_interval: Duration::from_millis(1),
        page_interval: Duration::ZERO,
        ..Default::default()
    })
    .unwrap()
}

/// Executions `ids`, newest first, one per second from 00:00:00
fn page(ids: impl Iterator<Item = i64>) -> Value {
    let executions: Vec<Value> = ids
        .map(|id| {
            json!({
                "id": id,
                "side": "BUY",
                "price": 1000 + id,
                "size": 0.5,
                "exec_date": format!("2019-03-01T00:00:{:02}.000", id),
                "buy_child_order_acceptance_id": format!("buy-{}", id),
                "sell_child_order_acceptance_id": format!("sell-{}", id)
            })
        })
        .collect();
    Value::Array(executions)
}

#[tokio::test]
async fn test_get_executions_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getexecutions"))
        .and(query_param("product_code", "FX_BTC_JPY"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page((1..=3).rev())))
        .expect(1)
        .mount(&server)
        .await;

    let executions = client(&server, 0)
        .get_executions(&ExecutionQuery::new("FX_BTC_JPY").count(3))
        .await
        .unwrap();

    assert_eq!(executions.len(), 3);
    assert_eq!(executions[0].id, 3);
    assert_eq!(executions[0].price, dec!(1003));
}

#[tokio::test]
async fn test_retries_on_configured_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/gethealth"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/gethealth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "BUSY"})))
        .expect(1)
        .mount(&server)
        .await;

    let health = client(&server, 3).get_health("BTC_JPY").await.unwrap();
    assert_eq!(health.status, HealthStatus::Busy);
}

#[tokio::test]
async fn test_gives_up_after_retry_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getticker"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 2).get_ticker("BTC_JPY").await.unwrap_err();
    match err {
        ApiError::Exchange { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_retry_on_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getboard"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": -156,
            "error_message": "Invalid product_code",
            "data": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 3).get_board("NOPE").await.unwrap_err();
    match err {
        ApiError::Exchange {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(-156));
            assert_eq!(message, "Invalid product_code");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_schema_mismatch_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getboardstate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"health": 42})))
        .mount(&server)
        .await;

    let err = client(&server, 0)
        .get_board_state("BTC_JPY")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_get_board_and_markets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getboard"))
        .and(query_param("product_code", "BTC_JPY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mid_price": 4000050,
            "bids": [{"price": 4000000, "size": 0.2}],
            "asks": [{"price": 4000100, "size": 0.3}, {"price": 4000200, "size": 1}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/getmarkets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"product_code": "BTC_JPY", "market_type": "Spot"},
            {"product_code": "FX_BTC_JPY", "market_type": "FX"}
        ])))
        .mount(&server)
        .await;

    let client = client(&server, 0);

    let board = client.get_board("BTC_JPY").await.unwrap();
    assert_eq!(board.mid_price, dec!(4000050));
    assert_eq!(board.total_ask_size(), dec!(1.3));

    let markets = client.get_markets().await.unwrap();
    assert_eq!(markets.len(), 2);
    assert_eq!(markets[1].market_type.as_deref(), Some("FX"));
}

#[tokio::test]
async fn test_executions_between_pages_backwards() {
    let server = MockServer::start().await;
    // second page, matched first because it is more specific
    Mock::given(method("GET"))
        .and(path("/v1/getexecutions"))
        .and(query_param("before", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page((1..=5).rev())))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/getexecutions"))
        .and(query_param("count", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page((6..=10).rev())))
        .expect(1)
        .mount(&server)
        .await;

    let from = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 3).unwrap();
    let to = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 8).unwrap();

    let executions = client(&server, 0)
        .executions_between("BTC_JPY", from, to)
        .await
        .unwrap();

    let ids: Vec<_> = executions.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 4, 5, 6, 7, 8]);

    let candles = build_candles(&executions, 2).unwrap();
    let times: Vec<_> = candles.iter().map(|c| c.time.timestamp() % 60).collect();
    assert_eq!(times, vec![2, 4, 6, 8]);
    assert_eq!(candles[0].volume, dec!(0.5));
    assert_eq!(candles[1].volume, dec!(1.0));
}

#[tokio::test]
async fn test_executions_between_stops_on_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getexecutions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let from = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap();
    let executions = client(&server, 0)
        .executions_between("BTC_JPY", from, Utc::now())
        .await
        .unwrap();
    assert!(executions.is_empty());
}
