//! Integration tests for configuration loading

use lightning_ohlc::api::RestConfig;
use lightning_ohlc::config::Config;
use lightning_ohlc::telemetry::LogFormat;
use std::time::Duration;

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.candles.product_code, "BTC_JPY");
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_rest_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
            [api]
            base_url = "http://127.0.0.1:9999"
            timeout_secs = 3
            retry_limit = 5
            retry_statuses = [429]
            retry_interval_ms = 20
            page_interval_ms = 0
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let rest = RestConfig::from(&config.api);

    assert_eq!(rest.base_url, "http://127.0.0.1:9999");
    assert_eq!(rest.timeout, Duration::from_secs(3));
    assert_eq!(rest.retry_limit, 5);
    assert_eq!(rest.retry_statuses, vec![429]);
    assert_eq!(rest.retry_interval, Duration::from_millis(20));
    assert_eq!(rest.page_interval, Duration::ZERO);
}

#[test]
fn test_invalid_toml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = 1").unwrap();

    assert!(Config::load(&path).is_err());
}
