//! Integration tests for candle building from wire data

use chrono::{TimeZone, Utc};
use lightning_ohlc::ohlc::{
    build_candles, build_candles_from_raw, closes, CandleError, Execution, RawExecution,
};
use rust_decimal_macros::dec;
use std::time::Duration;

const EXECUTIONS: &str = r#"[
    {"id": 1, "side": "BUY",  "price": 100, "size": 0.1,  "exec_date": "2019-03-01T00:00:00.0Z"},
    {"id": 2, "side": "BUY",  "price": 102, "size": 0.1,  "exec_date": "2019-03-01T00:00:01.0Z"},
    {"id": 3, "side": "SELL", "price": 99,  "size": 0.1,  "exec_date": "2019-03-01T00:00:02.0Z"},
    {"id": 4, "side": "BUY",  "price": 101, "size": 0.1,  "exec_date": "2019-03-01T00:00:04.0Z"},
    {"id": 5, "side": "SELL", "price": 110, "size": 0.1,  "exec_date": "2019-03-01T00:00:05.0Z"},
    {"id": 6, "side": "BUY",  "price": 120, "size": 0.01, "exec_date": "2019-03-01T00:00:09.9Z"},
    {"id": 7, "side": "",     "price": 200, "size": 0.01, "exec_date": "2019-03-01T00:00:10.0Z"},
    {"id": 8, "side": "BUY",  "price": 300, "size": 1.01, "exec_date": "2019-03-01T00:00:10.999Z"}
]"#;

fn records() -> Vec<RawExecution> {
    serde_json::from_str(EXECUTIONS).unwrap()
}

#[test]
fn test_candle_counts_per_interval() {
    let records = records();
    for (interval, expected) in [(1, 7), (2, 5), (5, 3), (10, 2)] {
        let candles = build_candles_from_raw(&records, None, interval).unwrap();
        assert_eq!(candles.len(), expected, "interval {}", interval);
    }
}

#[test]
fn test_five_second_candles_from_wire() {
    let candles = build_candles_from_raw(&records(), None, 5).unwrap();

    assert_eq!(
        candles[0].time,
        Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(candles[0].volume, dec!(0.4));
    assert_eq!(candles[2].volume, dec!(1.02));
    assert_eq!(closes(&candles), vec![dec!(101), dec!(120), dec!(300)]);

    // historical data has no receipt time
    assert!(candles.iter().all(|c| c.delay == Duration::ZERO));
}

#[test]
fn test_live_receipt_time_sets_delay() {
    let received = Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 11).unwrap();
    let candles = build_candles_from_raw(&records(), Some(received), 10).unwrap();

    // (11 + 10 + 9 + 7 + 6 + 1.1) / 6 = 7.35s
    assert_eq!(candles[0].delay, Duration::from_millis(7350));
    // (1 + 0.001) / 2 = 0.5005s
    assert_eq!(candles[1].delay, Duration::from_millis(500));
}

#[test]
fn test_parsed_and_built_paths_agree() {
    let records = records();
    let executions: Vec<Execution> = records
        .iter()
        .map(|r| Execution::from_raw(r, None))
        .collect::<Result<_, _>>()
        .unwrap();

    for interval in [1, 3, 5, 7, 60] {
        assert_eq!(
            build_candles(&executions, interval).unwrap(),
            build_candles_from_raw(&records, None, interval).unwrap()
        );
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        CandleError::InvalidInterval(0).to_string(),
        "Invalid candle interval: 0s"
    );

    let mut records = records();
    records[3].exec_date = "2019-13-01T00:00:04Z".to_string();
    let err = build_candles_from_raw(&records, None, 5).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid timestamp on execution 4: \"2019-13-01T00:00:04Z\""
    );
}
