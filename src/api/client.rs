//! REST client for the public HTTP API
//!
//! Requests that fail with a status listed in
//! [`RestConfig::retry_statuses`] are retried after
//! [`RestConfig::retry_interval`], up to [`RestConfig::retry_limit`] times.

use super::types::{Board, BoardState, ErrorBody, ExecutionQuery, Health, Market, Ticker};
use super::ApiError;
use crate::config::ApiConfig;
use crate::ohlc::{Execution, RawExecution};
use crate::telemetry::{self, LatencyMetric};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Production API base URL
pub const API_BASE_URL: &str = "https://api.bitflyer.com";

/// Page size used when walking execution history
const HISTORY_PAGE_SIZE: u32 = 500;

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL without version prefix
    pub base_url: String,
    /// API version, joined as `/v{version}`
    pub api_version: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retries per request
    pub retry_limit: u32,
    /// HTTP statuses that trigger a retry
    pub retry_statuses: Vec<u16>,
    /// Pause before each retry
    pub retry_interval: Duration,
    /// Pause between history pages
    pub page_interval: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            api_version: "1".to_string(),
            timeout: Duration::from_secs(10),
            retry_limit: 3,
            retry_statuses: vec![500, 502, 503, 504],
            retry_interval: Duration::from_secs(1),
            page_interval: Duration::from_secs(1),
        }
    }
}

impl From<&ApiConfig> for RestConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            retry_limit: config.retry_limit,
            retry_statuses: config.retry_statuses.clone(),
            retry_interval: Duration::from_millis(config.retry_interval_ms),
            page_interval: Duration::from_millis(config.page_interval_ms),
        }
    }
}

/// Client for the public REST endpoints
pub struct RestClient {
    config: RestConfig,
    client: Client,
}

impl RestClient {
    /// Create a client against the production API
    pub fn new() -> Result<Self, ApiError> {
        Self::with_config(RestConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: RestConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Active configuration
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// List tradable products
    pub async fn get_markets(&self) -> Result<Vec<Market>, ApiError> {
        self.get("/getmarkets", &[]).await
    }

    /// Fetch the ticker of a product
    pub async fn get_ticker(&self, product_code: &str) -> Result<Ticker, ApiError> {
        self.get("/getticker", &product_query(product_code)).await
    }

    /// Fetch the order book of a product
    pub async fn get_board(&self, product_code: &str) -> Result<Board, ApiError> {
        self.get("/getboard", &product_query(product_code)).await
    }

    /// Fetch the board health and trading state
    pub async fn get_board_state(&self, product_code: &str) -> Result<BoardState, ApiError> {
        self.get("/getboardstate", &product_query(product_code)).await
    }

    /// Fetch exchange health
    pub async fn get_health(&self, product_code: &str) -> Result<Health, ApiError> {
        self.get("/gethealth", &product_query(product_code)).await
    }

    /// Fetch one page of executions, newest first
    pub async fn get_executions(
        &self,
        query: &ExecutionQuery,
    ) -> Result<Vec<RawExecution>, ApiError> {
        self.get("/getexecutions", &query.to_query()).await
    }

    /// Collect all executions with `from <= time <= to`
    ///
    /// Pages backwards from the newest execution until a page reaches past
    /// `from`. The result is sorted ascending by id, ready for candle
    /// building. Historical executions carry a zero delay.
    pub async fn executions_between(
        &self,
        product_code: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Execution>, ApiError> {
        let mut collected: Vec<Execution> = Vec::new();
        let mut before: Option<i64> = None;

        loop {
            let mut query = ExecutionQuery::new(product_code).count(HISTORY_PAGE_SIZE);
            if let Some(id) = before {
                query = query.before(id);
            }

            let page = self.get_executions(&query).await?;
            if page.is_empty() {
                break;
            }

            let mut page = page
                .iter()
                .map(|raw| Execution::from_raw(raw, None))
                .collect::<Result<Vec<_>, _>>()?;
            page.sort_by_key(|e| e.id);

            let oldest = &page[0];
            let reached_start = oldest.time < from;
            before = Some(oldest.id);

            tracing::debug!(
                product = product_code,
                oldest_id = oldest.id,
                oldest_time = %oldest.time,
                page_len = page.len(),
                "Fetched execution page"
            );

            collected.extend(page);
            if reached_start {
                break;
            }

            sleep(self.config.page_interval).await;
        }

        collected.retain(|e| e.time >= from && e.time <= to);
        collected.sort_by_key(|e| e.id);
        collected.dedup_by_key(|e| e.id);

        tracing::info!(
            product = product_code,
            count = collected.len(),
            "Collected execution history"
        );

        Ok(collected)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/v{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            path
        )
    }

    /// GET with retry on configured statuses
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut attempt = 0;

        loop {
            match self.send(&url, query).await {
                Ok(body) => return Ok(serde_json::from_str(&body)?),
                Err(e) if attempt < self.config.retry_limit && self.is_retryable(&e) => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        attempt,
                        limit = self.config.retry_limit,
                        path,
                        "Request failed, retrying"
                    );
                    sleep(self.config.retry_interval).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send(&self, url: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        tracing::debug!(url = %url, "GET");

        let started = Instant::now();
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        telemetry::record_latency(LatencyMetric::RestRequest, started.elapsed());

        if !status.is_success() {
            return Err(exchange_error(status.as_u16(), &body));
        }
        Ok(body)
    }

    fn is_retryable(&self, error: &ApiError) -> bool {
        match error {
            ApiError::Exchange { status, .. } => self.config.retry_statuses.contains(status),
            _ => false,
        }
    }
}

fn product_query(product_code: &str) -> Vec<(&'static str, String)> {
    vec![("product_code", product_code.to_string())]
}

fn exchange_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => ApiError::Exchange {
            status,
            code: Some(err.status),
            message: err.error_message,
        },
        Err(_) => ApiError::Exchange {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}
