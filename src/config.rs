//! Configuration types for lightning-ohlc

use crate::ohlc::validate_interval;
use crate::telemetry::LogFormat;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
    #[serde(default)]
    pub candles: CandleConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries per request for statuses in `retry_statuses`
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,
    #[serde(default = "default_retry_statuses")]
    pub retry_statuses: Vec<u16>,
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Pause between execution history pages
    #[serde(default = "default_page_interval_ms")]
    pub page_interval_ms: u64,
}

fn default_api_version() -> String {
    "1".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_retry_limit() -> u32 {
    3
}
fn default_retry_statuses() -> Vec<u16> {
    vec![500, 502, 503, 504]
}
fn default_retry_interval_ms() -> u64 {
    1000
}
fn default_page_interval_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bitflyer.com".to_string(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            retry_limit: default_retry_limit(),
            retry_statuses: default_retry_statuses(),
            retry_interval_ms: default_retry_interval_ms(),
            page_interval_ms: default_page_interval_ms(),
        }
    }
}

/// Realtime (JSON-RPC over WebSocket) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    #[serde(default = "default_realtime_url")]
    pub url: String,
    /// Reconnection attempts before giving up (0 = infinite)
    #[serde(default = "default_max_reconnects")]
    pub max_reconnects: u32,
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,
}

fn default_realtime_url() -> String {
    "wss://ws.lightstream.bitflyer.com/json-rpc".to_string()
}
fn default_max_reconnects() -> u32 {
    10
}
fn default_ping_interval_secs() -> u64 {
    30
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_realtime_url(),
            max_reconnects: default_max_reconnects(),
            ping_interval_secs: default_ping_interval_secs(),
        }
    }
}

/// Candle building defaults for the CLI
#[derive(Debug, Clone, Deserialize)]
pub struct CandleConfig {
    #[serde(default = "default_product_code")]
    pub product_code: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: i64,
}

fn default_product_code() -> String {
    "BTC_JPY".to_string()
}
fn default_interval_secs() -> i64 {
    60
}

impl Default for CandleConfig {
    fn default() -> Self {
        Self {
            product_code: default_product_code(),
            interval_secs: default_interval_secs(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: None,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.realtime.ping_interval_secs > 0,
            "realtime.ping_interval_secs must be at least 1"
        );
        anyhow::ensure!(self.api.timeout_secs > 0, "api.timeout_secs must be at least 1");
        validate_interval(self.candles.interval_secs)?;
        Ok(())
    }
}
